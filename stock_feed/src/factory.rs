//! Resolution of a concrete quote source per tracked symbol.
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use log::warn;
use reqwest::blocking::Client;
use stock_common::{PayloadFormat, QuoteSource, QuoteSourceFactory, Result};
use strum_macros::{Display, EnumString};

use crate::file::FileQuoteSource;
use crate::http::{
    DEFAULT_CSV_ENDPOINT, DEFAULT_JSON_ENDPOINT, DEFAULT_TIMEOUT, HttpQuoteSource, build_client,
};
use crate::simulated::SimulatedQuoteSource;

/// Which quote source variant to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, EnumString)]
#[value(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FeedKind {
    /// Remote HTTP provider.
    #[default]
    Http,
    /// Payload files in a local directory.
    File,
    /// Offline random walk.
    Simulated,
}

/// Settings used to resolve quote sources.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Source variant.
    pub kind: FeedKind,
    /// Payload format for HTTP and file sources.
    pub format: PayloadFormat,
    /// Endpoint template; the format's default endpoint when `None`.
    pub endpoint: Option<String>,
    /// Directory holding payload files for the file source.
    pub quotes_dir: Option<PathBuf>,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Failure rate of simulated sources.
    pub failure_rate: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            kind: FeedKind::default(),
            format: PayloadFormat::default(),
            endpoint: None,
            quotes_dir: None,
            timeout: DEFAULT_TIMEOUT,
            failure_rate: 0.0,
        }
    }
}

impl FeedConfig {
    /// Endpoint template in effect for HTTP sources.
    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.format) {
            (Some(endpoint), _) => endpoint.as_str(),
            (None, PayloadFormat::Json) => DEFAULT_JSON_ENDPOINT,
            (None, PayloadFormat::Csv) => DEFAULT_CSV_ENDPOINT,
        }
    }
}

/// Quote source factory driven by a `FeedConfig`.
pub struct FeedFactory {
    config: FeedConfig,
    client: Option<Client>,
}

impl FeedFactory {
    /// Creates the factory; HTTP feeds build one client shared by every source.
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = match config.kind {
            FeedKind::Http => Some(build_client(config.timeout)?),
            FeedKind::File | FeedKind::Simulated => None,
        };
        Ok(Self { config, client })
    }

    /// Configuration the factory was built with.
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }
}

impl QuoteSourceFactory for FeedFactory {
    fn create_source(&self, symbol: &str) -> Option<Box<dyn QuoteSource>> {
        match self.config.kind {
            FeedKind::Http => self.client.as_ref().map(|client| {
                Box::new(HttpQuoteSource::with_client(
                    client.clone(),
                    self.config.endpoint(),
                    self.config.format,
                )) as Box<dyn QuoteSource>
            }),
            FeedKind::File => match &self.config.quotes_dir {
                Some(dir) => Some(
                    Box::new(FileQuoteSource::new(dir, self.config.format)) as Box<dyn QuoteSource>,
                ),
                None => {
                    warn!("No quotes directory configured; cannot serve {}", symbol);
                    None
                }
            },
            FeedKind::Simulated => Some(Box::new(
                SimulatedQuoteSource::random().with_failure_rate(self.config.failure_rate),
            ) as Box<dyn QuoteSource>),
        }
    }
}
