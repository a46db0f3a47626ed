//! Command-line arguments for the market watcher.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use stock_common::PayloadFormat;
use stock_feed::{FeedConfig, FeedKind};

/// Usage line printed when the refresh rate or the symbols are missing.
pub const USAGE: &str = "Usage: stock_watch <Refresh Rate> <Symbol 0> <Symbol 1> ... <Symbol n>\n \
where Symbol are valid stock market symbols for companies on the stock market.";

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seconds to wait between polling cycles.
    pub refresh_rate: Option<u64>,

    /// Ticker symbols to watch, in display order.
    pub symbols: Vec<String>,

    /// Number of polling cycles to run; runs until Ctrl+C when omitted.
    #[clap(long)]
    pub run_count: Option<u32>,

    /// Where quotes come from.
    #[clap(long, value_enum, default_value_t = FeedKind::Http)]
    pub source: FeedKind,

    /// Payload format of the http and file sources.
    #[clap(long, value_enum, default_value_t = PayloadFormat::Json)]
    pub format: PayloadFormat,

    /// Endpoint template for the http source; `{symbol}` is replaced by the ticker.
    #[clap(long)]
    pub endpoint: Option<String>,

    /// Directory with `<SYMBOL>.json` / `<SYMBOL>.csv` payloads for the file source.
    #[clap(long)]
    pub quotes_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[clap(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Fraction of simulated fetches that fail.
    #[clap(long, default_value_t = 0.0)]
    pub failure_rate: f64,

    /// Ticker listing (`SYMBOL,Company Name` per line) replacing the built-in one.
    #[clap(long)]
    pub tickers_file: Option<PathBuf>,

    /// Directory with the cue sound files; cues whose file is missing are skipped.
    #[clap(long)]
    pub cues_dir: Option<PathBuf>,

    /// Disable audio cues.
    #[clap(long)]
    pub mute: bool,
}

impl Args {
    /// Refresh interval, or `None` when the invocation lacks a rate or symbols.
    pub fn refresh_interval(&self) -> Option<Duration> {
        match self.refresh_rate {
            Some(seconds) if !self.symbols.is_empty() => Some(Duration::from_secs(seconds)),
            _ => None,
        }
    }

    /// Quote feed settings derived from the arguments.
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            kind: self.source,
            format: self.format,
            endpoint: self.endpoint.clone(),
            quotes_dir: self.quotes_dir.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            failure_rate: self.failure_rate,
        }
    }
}
