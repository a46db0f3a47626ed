//!
//! Common types shared by the quote feed and the market watcher.
//!
//! This crate aggregates:
//! - `error` — unified error type `MarketError` used across the workspace.
//! - `result` — handy `Result<T, MarketError>` alias.
//! - `quote` — the immutable `QuoteRecord` snapshot.
//! - `source` — the `QuoteSource` / `QuoteSourceFactory` capabilities and payload formats.
//! - `tickers` — built-in ticker symbols and the `TickerDirectory` lookup.
#![warn(missing_docs)]
pub mod error;
pub mod quote;
pub mod result;
pub mod source;
pub mod tickers;

pub use error::MarketError;
pub use quote::QuoteRecord;
pub use result::Result;
pub use source::{PayloadFormat, QuoteSource, QuoteSourceFactory};
pub use tickers::{BuiltinListing, FileListing, TickerDirectory};
