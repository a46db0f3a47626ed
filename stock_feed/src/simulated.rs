//! Synthetic quote source for offline runs.
//!
//! Prices follow a small random walk around the last price. The previous close stays
//! fixed at the starting price for the life of the source, so the reported change is
//! always `last - close`. An optional failure rate makes some fetches fail, which
//! exercises the connection-error path of the watcher.

use rand::Rng;
use stock_common::{MarketError, QuoteRecord, QuoteSource, Result};

/// Lowest price the walk may reach.
pub const MIN_PRICE: f64 = 0.01;

/// Random-walk quote source.
#[derive(Debug, Clone)]
pub struct SimulatedQuoteSource {
    previous_close: f64,
    last_price: f64,
    failure_rate: f64,
}

impl SimulatedQuoteSource {
    /// Starts a walk at `start_price`, which is also the previous close.
    pub fn new(start_price: f64) -> Self {
        let start = start_price.max(MIN_PRICE);
        Self {
            previous_close: start,
            last_price: start,
            failure_rate: 0.0,
        }
    }

    /// Starts a walk at a random price between 20 and 500.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::new(rng.random_range(20.0..500.0))
    }

    /// Fraction of fetches (0.0..=1.0) that fail with a connection error.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate.clamp(0.0, 1.0);
        self
    }

    /// Calculate the next price using a walk of at most ±1% around `current_price`,
    /// clamped to `MIN_PRICE`.
    pub fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.01..0.01);
        let new_price = current_price * (1.0 + change);
        new_price.max(MIN_PRICE)
    }
}

impl QuoteSource for SimulatedQuoteSource {
    fn fetch(&mut self, symbol: &str) -> Result<QuoteRecord> {
        if self.failure_rate > 0.0 && rand::rng().random_bool(self.failure_rate) {
            return Err(MarketError::Connection(format!(
                "simulated outage while quoting {}",
                symbol
            )));
        }
        self.last_price = Self::next_price(self.last_price);
        QuoteRecord::new(
            symbol,
            self.previous_close,
            self.last_price,
            self.last_price - self.previous_close,
        )
    }
}
