//! Market watcher: polls quotes for a set of symbols, reports price movements and
//! plays an audio cue reflecting each symbol's performance.
//!
//! - `analyzer` — per-symbol two-sample history and derived figures.
//! - `audio` — cue player and the sentiment cues.
//! - `market` — `MarketWatch`, the poll/report/sleep loop.
//! - `report` — fixed-width console report.
//! - `pacer` — interruptible pause between cycles.
//! - `args` — command-line interface.
#![warn(missing_docs)]
pub mod analyzer;
pub mod args;
pub mod audio;
pub mod market;
pub mod pacer;
pub mod report;

pub use analyzer::{AnalysisState, SymbolAnalyzer};
pub use audio::{AudioCue, AudioPlayer, CuePlayer, TerminalBell};
pub use market::MarketWatch;
