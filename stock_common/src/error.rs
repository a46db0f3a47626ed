//! Error types shared by the feed and the watcher.
//!
//! The `MarketError` enum unifies the analysis taxonomy (invalid symbol, missing
//! source, connection failure, missing history) with the ambient I/O and
//! parsing failures, so every crate in the workspace propagates a single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the feed and the watcher.
#[derive(Error, Debug)]
pub enum MarketError {
    /// The ticker symbol is not known to the directory service.
    #[error("Symbol {0} not found.")]
    InvalidSymbol(String),

    /// No quote source could be resolved for the symbol.
    #[error("The source for stock quotes can not be absent (symbol {0})")]
    MissingSource(String),

    /// A quote could not be obtained: unreachable host, bad status, malformed payload,
    /// missing file. All provider failures collapse into this one kind.
    #[error("Unable to connect with stock ticker source: {0}")]
    Connection(String),

    /// Queried before any successful refresh.
    #[error("No quote has ever been retrieved.")]
    NoDataYet,

    /// Queried before two successful refreshes.
    #[error("Fewer than two quotes have been retrieved.")]
    InsufficientHistory,

    /// The stored quote cannot produce a meaningful figure (e.g. zero previous close).
    #[error("Invalid analysis state: {0}")]
    InvalidAnalysisState(String),

    /// I/O error originating from the standard library, files or the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while decoding JSON via serde_json.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing a ticker listing file.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// Startup left nothing to track.
    #[error("No valid symbols to track")]
    NoSymbols,
}

impl<T> From<PoisonError<T>> for MarketError {
    fn from(err: PoisonError<T>) -> Self {
        MarketError::MutexLock(err.to_string())
    }
}
