//! Concrete quote sources for the market watcher.
//!
//! - `payload` — JSON and CSV provider payload parsers.
//! - `http` — blocking HTTP provider source.
//! - `file` — payload files read from a local directory.
//! - `simulated` — offline random-walk source.
//! - `factory` — `FeedFactory`, which resolves one of the above per symbol.
#![warn(missing_docs)]
pub mod factory;
pub mod file;
pub mod http;
pub mod payload;
pub mod simulated;

pub use factory::{FeedConfig, FeedFactory, FeedKind};
pub use file::FileQuoteSource;
pub use http::HttpQuoteSource;
pub use simulated::SimulatedQuoteSource;
