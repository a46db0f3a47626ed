//! Per-symbol quote history and the figures derived from it.
//!
//! A `SymbolAnalyzer` keeps the two most recent successful quotes for one symbol:
//!
//! - `Uninitialized` — no refresh has succeeded; every query fails with `NoDataYet`.
//! - `SingleSample` — close/price/change queries work, change since the last check
//!   fails with `InsufficientHistory`.
//! - `DoubleSample` — every query works.
//!
//! A failed refresh leaves both slots untouched and surfaces `Connection`.
use std::sync::Arc;

use log::{debug, warn};
use stock_common::tickers::normalize_symbol;
use stock_common::{MarketError, QuoteRecord, QuoteSource, Result, TickerDirectory};

use crate::audio::AudioPlayer;

/// How many successful refreshes the analyzer has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    /// No quote yet.
    Uninitialized,
    /// Exactly one quote.
    SingleSample,
    /// A current and a previous quote.
    DoubleSample,
}

/// Two-sample quote history for a single symbol.
pub struct SymbolAnalyzer {
    symbol: String,
    source: Box<dyn QuoteSource>,
    audio_player: Option<Arc<dyn AudioPlayer>>,
    previous_quote: Option<QuoteRecord>,
    current_quote: Option<QuoteRecord>,
}

impl SymbolAnalyzer {
    /// Creates an analyzer for `symbol`.
    ///
    /// Fails with `InvalidSymbol` when `directory` does not know the symbol and with
    /// `MissingSource` when no quote source is given. A missing audio player only
    /// silences the cues.
    pub fn new(
        symbol: &str,
        source: Option<Box<dyn QuoteSource>>,
        audio_player: Option<Arc<dyn AudioPlayer>>,
        directory: &dyn TickerDirectory,
    ) -> Result<Self> {
        let symbol = normalize_symbol(symbol);
        if !directory.is_valid_symbol(&symbol) {
            return Err(MarketError::InvalidSymbol(symbol));
        }
        let source = source.ok_or_else(|| MarketError::MissingSource(symbol.clone()))?;

        Ok(Self {
            symbol,
            source,
            audio_player,
            previous_quote: None,
            current_quote: None,
        })
    }

    /// Symbol being analyzed.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Current position in the sample state machine.
    pub fn state(&self) -> AnalysisState {
        match (&self.previous_quote, &self.current_quote) {
            (_, None) => AnalysisState::Uninitialized,
            (None, Some(_)) => AnalysisState::SingleSample,
            (Some(_), Some(_)) => AnalysisState::DoubleSample,
        }
    }

    /// Most recent quote, if any.
    pub fn current_quote(&self) -> Option<&QuoteRecord> {
        self.current_quote.as_ref()
    }

    /// Quote before the most recent one, if any.
    pub fn previous_quote(&self) -> Option<&QuoteRecord> {
        self.previous_quote.as_ref()
    }

    /// Fetches a new quote and shifts the current one into the previous slot.
    pub fn refresh(&mut self) -> Result<()> {
        match self.source.fetch(&self.symbol) {
            Ok(quote) => {
                debug!("{}: {}", self.symbol, quote);
                self.previous_quote = self.current_quote.take();
                self.current_quote = Some(quote);
                Ok(())
            }
            Err(e) => {
                warn!("Refresh of {} failed: {}", self.symbol, e);
                match e {
                    MarketError::Connection(message) => Err(MarketError::Connection(message)),
                    other => Err(MarketError::Connection(other.to_string())),
                }
            }
        }
    }

    fn current(&self) -> Result<&QuoteRecord> {
        self.current_quote.as_ref().ok_or(MarketError::NoDataYet)
    }

    /// Previous session's closing price.
    pub fn previous_close(&self) -> Result<f64> {
        Ok(self.current()?.previous_close())
    }

    /// Last traded price.
    pub fn current_price(&self) -> Result<f64> {
        Ok(self.current()?.last_trade())
    }

    /// Reported change minus the previous close.
    ///
    /// This subtracts the close from the provider's change figure rather than from
    /// the last trade, so for a quote (close 35.5, last 40.0, change 5.0) it
    /// yields -30.5.
    pub fn change_since_close(&self) -> Result<f64> {
        let quote = self.current()?;
        Ok(quote.change() - quote.previous_close())
    }

    /// Percent change since the close, rounded half-up to two decimals.
    pub fn percent_change_since_close(&self) -> Result<f64> {
        let quote = self.current()?;
        if quote.previous_close() == 0.0 {
            return Err(MarketError::InvalidAnalysisState(format!(
                "previous close of {} is zero",
                self.symbol
            )));
        }
        let basis_points = 10_000.0 * quote.change() / quote.previous_close();
        if !basis_points.is_finite() {
            return Err(MarketError::InvalidAnalysisState(format!(
                "percent change of {} is not finite",
                self.symbol
            )));
        }
        Ok(round_half_up(basis_points) / 100.0)
    }

    /// Last trade of the current quote minus last trade of the previous one.
    pub fn change_since_last_check(&self) -> Result<f64> {
        let current = self.current()?;
        let previous = self
            .previous_quote
            .as_ref()
            .ok_or(MarketError::InsufficientHistory)?;
        Ok(current.last_trade() - previous.last_trade())
    }

    /// Plays happy when the percent change is positive and sad when it is at or
    /// below -1. The two thresholds are checked independently. Plays error when the
    /// percent change cannot be computed. Does nothing without an audio player.
    pub fn play_appropriate_audio(&self) {
        let Some(player) = &self.audio_player else {
            return;
        };
        match self.percent_change_since_close() {
            Ok(percent) => {
                if percent > 0.0 {
                    player.play_happy();
                }
                if percent <= -1.0 {
                    player.play_sad();
                }
            }
            Err(e) => {
                debug!("No sentiment for {}: {}", self.symbol, e);
                player.play_error();
            }
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
