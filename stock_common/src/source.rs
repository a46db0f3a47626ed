//! Quote source capability shared by the feed implementations and the analyzer.
//!
//! A `QuoteSource` turns a symbol into a `QuoteRecord` or fails with
//! `MarketError::Connection`. A `QuoteSourceFactory` resolves one source per tracked
//! symbol when the watcher starts.
use clap::ValueEnum;
use strum_macros::{Display, EnumString};

use crate::quote::QuoteRecord;
use crate::result::Result;

/// Provider of point-in-time quotes for a symbol.
pub trait QuoteSource: Send {
    /// Fetches the latest quote for `symbol`.
    ///
    /// Every failure (network, provider status, malformed payload) must be reported
    /// as `MarketError::Connection`.
    fn fetch(&mut self, symbol: &str) -> Result<QuoteRecord>;
}

/// Builds quote sources for individual symbols.
pub trait QuoteSourceFactory {
    /// Returns a source for `symbol`, or `None` when no source can serve it.
    fn create_source(&self, symbol: &str) -> Option<Box<dyn QuoteSource>>;
}

/// Wire format of a provider payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, EnumString)]
#[value(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PayloadFormat {
    /// Key/value JSON object (`t`, `l`, `pcls_fix`, `c`).
    #[default]
    Json,
    /// Positional CSV line (`symbol,last,date,time,change,...`).
    Csv,
}

impl PayloadFormat {
    /// File extension used by file-backed sources.
    pub fn extension(self) -> &'static str {
        match self {
            PayloadFormat::Json => "json",
            PayloadFormat::Csv => "csv",
        }
    }
}
