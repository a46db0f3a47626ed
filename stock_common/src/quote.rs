//! Quote record produced by every quote source.
//!
//! A `QuoteRecord` is an immutable point-in-time snapshot: symbol, previous close,
//! last trade and the provider-reported change. The record does not check that the
//! three prices agree with each other, since providers compute "change" differently.
use std::fmt;

use crate::error::MarketError;
use crate::result::Result;

/// Point-in-time price snapshot for a single ticker symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRecord {
    symbol: String,
    previous_close: f64,
    last_trade: f64,
    change: f64,
}

impl QuoteRecord {
    /// Builds a record; the symbol must not be blank.
    pub fn new(symbol: &str, previous_close: f64, last_trade: f64, change: f64) -> Result<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MarketError::Format(String::from(
                "quote record requires a non-empty symbol",
            )));
        }
        Ok(Self {
            symbol: symbol.to_string(),
            previous_close,
            last_trade,
            change,
        })
    }

    /// Ticker symbol the quote belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Closing price of the previous session.
    pub fn previous_close(&self) -> f64 {
        self.previous_close
    }

    /// Last traded price, i.e. the current price.
    pub fn last_trade(&self) -> f64 {
        self.last_trade
    }

    /// Signed change as reported by the provider.
    pub fn change(&self) -> f64 {
        self.change
    }
}

impl fmt::Display for QuoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) Last Trade: {} Prev. Close: {}",
            self.symbol, self.last_trade, self.previous_close
        )
    }
}
