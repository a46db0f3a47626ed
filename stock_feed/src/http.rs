//! Quote source that downloads payloads from an HTTP provider.
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use stock_common::{MarketError, PayloadFormat, QuoteRecord, QuoteSource, Result};

use crate::payload::parse_quote;

/// Placeholder replaced by the ticker symbol in endpoint templates.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";
/// Default JSON endpoint template.
pub const DEFAULT_JSON_ENDPOINT: &str = "http://www.google.com/finance/info?q=NSE:{symbol}";
/// Default CSV endpoint template.
pub const DEFAULT_CSV_ENDPOINT: &str =
    "http://download.finance.yahoo.com/d/quotes.csv?s={symbol}&f=sl1d1t1c1ohgv&e=.csv";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the blocking HTTP client shared by all HTTP sources.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| MarketError::Format(format!("Failed to build HTTP client: {}", e)))
}

/// Blocking HTTP quote source for one provider endpoint.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    endpoint: String,
    format: PayloadFormat,
}

impl HttpQuoteSource {
    /// Creates a source with its own client.
    pub fn new(endpoint: &str, format: PayloadFormat, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, endpoint, format))
    }

    /// Creates a source reusing an existing client.
    pub fn with_client(client: Client, endpoint: &str, format: PayloadFormat) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            format,
        }
    }

    /// Endpoint URL for `symbol`.
    pub fn url_for(&self, symbol: &str) -> String {
        self.endpoint.replace(SYMBOL_PLACEHOLDER, symbol)
    }

    fn download(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| MarketError::Format(e.to_string()))?;
        response
            .text()
            .map_err(|e| MarketError::Format(e.to_string()))
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&mut self, symbol: &str) -> Result<QuoteRecord> {
        let url = self.url_for(symbol);
        debug!("Requesting quote for {} from {}", symbol, url);
        self.download(&url)
            .and_then(|text| parse_quote(self.format, symbol, &text))
            .map_err(|e| MarketError::Connection(format!("Unable to connect with {}: {}", url, e)))
    }
}
