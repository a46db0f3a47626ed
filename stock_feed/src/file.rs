//! Quote source reading provider payloads from a local directory.
//!
//! Each fetch re-reads `<dir>/<SYMBOL>.<ext>`, so an external process can drop fresh
//! payloads between polling cycles.
use std::fs;
use std::path::{Path, PathBuf};

use stock_common::{MarketError, PayloadFormat, QuoteRecord, QuoteSource, Result};

use crate::payload::parse_quote;

/// File-backed quote source.
#[derive(Debug, Clone)]
pub struct FileQuoteSource {
    dir: PathBuf,
    format: PayloadFormat,
}

impl FileQuoteSource {
    /// Creates a source reading payloads of `format` from `dir`.
    pub fn new<P: AsRef<Path>>(dir: P, format: PayloadFormat) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            format,
        }
    }

    /// Payload path for `symbol`.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", symbol, self.format.extension()))
    }
}

impl QuoteSource for FileQuoteSource {
    fn fetch(&mut self, symbol: &str) -> Result<QuoteRecord> {
        let path = self.path_for(symbol);
        fs::read_to_string(&path)
            .map_err(MarketError::from)
            .and_then(|text| parse_quote(self.format, symbol, &text))
            .map_err(|e| {
                MarketError::Connection(format!("Unable to read {}: {}", path.display(), e))
            })
    }
}
