//! Polling orchestration over every tracked symbol.
//!
//! `MarketWatch` owns one `SymbolAnalyzer` per symbol and repeats a cycle of
//! refresh → report → pause. Cycles never overlap: the next one starts only after the
//! pause that follows the previous one.
//!
//! Failure isolation:
//! - A symbol that cannot be tracked (unknown, no source) is reported once at
//!   construction and left out; the remaining symbols are still tracked.
//! - A refresh or analysis failure inside a cycle is reported on that symbol's row
//!   and plays the error cue; the cycle moves on to the next symbol.
//!
//! The first cycle only reports prices. From the second cycle on, each row also shows
//! the change since the previous cycle and plays the sentiment cue.
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;
use crossbeam_channel::Sender;
use log::{error, info, warn};
use stock_common::{QuoteSourceFactory, Result, TickerDirectory};

use crate::analyzer::SymbolAnalyzer;
use crate::audio::AudioPlayer;
use crate::pacer::{Pacer, Pause};
use crate::report::{ReportRow, write_footer, write_header};

/// Refresh interval used when none is configured.
pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_secs(60);

/// Poll/report/sleep loop over a fixed set of symbol analyzers.
pub struct MarketWatch {
    analyzers: Vec<SymbolAnalyzer>,
    directory: Arc<dyn TickerDirectory>,
    audio_player: Option<Arc<dyn AudioPlayer>>,
    out: Box<dyn Write + Send>,
    refresh_rate: Duration,
    run_count: Option<u32>,
    first_cycle: bool,
    pacer: Pacer,
    shutdown: Arc<AtomicBool>,
}

impl MarketWatch {
    /// Builds analyzers for `symbols`, reporting to stdout.
    pub fn new<S: AsRef<str>>(
        symbols: &[S],
        factory: &dyn QuoteSourceFactory,
        audio_player: Option<Arc<dyn AudioPlayer>>,
        directory: Arc<dyn TickerDirectory>,
    ) -> Self {
        Self::with_output(symbols, factory, audio_player, directory, Box::new(io::stdout()))
    }

    /// Builds analyzers for `symbols`, reporting to `out`.
    ///
    /// Symbols that fail construction are reported on `out`, play the error cue and
    /// are left out of the tracked set.
    pub fn with_output<S: AsRef<str>>(
        symbols: &[S],
        factory: &dyn QuoteSourceFactory,
        audio_player: Option<Arc<dyn AudioPlayer>>,
        directory: Arc<dyn TickerDirectory>,
        out: Box<dyn Write + Send>,
    ) -> Self {
        let mut watch = Self {
            analyzers: Vec::with_capacity(symbols.len()),
            directory,
            audio_player,
            out,
            refresh_rate: DEFAULT_REFRESH_RATE,
            run_count: None,
            first_cycle: true,
            pacer: Pacer::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
        };

        for symbol in symbols {
            let symbol = symbol.as_ref();
            match SymbolAnalyzer::new(
                symbol,
                factory.create_source(symbol),
                watch.audio_player.clone(),
                watch.directory.as_ref(),
            ) {
                Ok(analyzer) => watch.analyzers.push(analyzer),
                Err(e) => {
                    warn!("Not tracking {}: {}", symbol, e);
                    if let Err(io_err) = watch.show_error_message(&e.to_string()) {
                        error!("Failed to write report: {}", io_err);
                    }
                }
            }
        }
        watch
    }

    /// Sets the pause between cycles.
    pub fn with_refresh_rate(mut self, refresh_rate: Duration) -> Self {
        self.refresh_rate = refresh_rate;
        self
    }

    /// Limits the number of cycles; `None` runs until shutdown.
    pub fn with_run_count(mut self, run_count: Option<u32>) -> Self {
        self.run_count = run_count;
        self
    }

    /// Replaces the report sink.
    pub fn set_output(&mut self, out: Box<dyn Write + Send>) {
        self.out = out;
    }

    /// Pause between cycles.
    pub fn refresh_rate(&self) -> Duration {
        self.refresh_rate
    }

    /// Remaining cycle bound.
    pub fn run_count(&self) -> Option<u32> {
        self.run_count
    }

    /// Whether the next cycle is the first one.
    pub fn is_first_cycle(&self) -> bool {
        self.first_cycle
    }

    /// Tracked symbols in display order.
    pub fn tracked_symbols(&self) -> Vec<&str> {
        self.analyzers.iter().map(SymbolAnalyzer::symbol).collect()
    }

    /// Tracked analyzers in display order.
    pub fn analyzers(&self) -> &[SymbolAnalyzer] {
        &self.analyzers
    }

    /// Flag that stops `run` before its next cycle once set.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Sender that interrupts the pause between cycles.
    pub fn interrupter(&self) -> Sender<()> {
        self.pacer.interrupter()
    }

    /// Plays the error cue and writes `Error: <text>` to the report.
    pub fn show_error_message(&mut self, text: &str) -> io::Result<()> {
        report_error(self.out.as_mut(), self.audio_player.as_deref(), text)
    }

    /// Runs one polling cycle over every tracked symbol.
    ///
    /// Quote and analysis failures are reported per symbol. Report writes are
    /// best-effort: a failed write is logged, the cycle still polls every symbol,
    /// and the first write failure is returned once the cycle is over.
    pub fn update_data(&mut self) -> io::Result<()> {
        let mut sink_error = None;
        keep_first(&mut sink_error, write_header(self.out.as_mut(), Local::now()));

        for analyzer in self.analyzers.iter_mut() {
            let written = match poll_symbol(analyzer, self.directory.as_ref(), self.first_cycle) {
                Ok(row) => writeln!(self.out, "{}", row),
                Err(e) => {
                    report_error(self.out.as_mut(), self.audio_player.as_deref(), &e.to_string())
                }
            };
            keep_first(&mut sink_error, written);
        }

        keep_first(&mut sink_error, write_footer(self.out.as_mut()));
        keep_first(&mut sink_error, self.out.flush());
        self.first_cycle = false;
        sink_error.map_or(Ok(()), Err)
    }

    /// Repeats `update_data` and the pause until the run count is exhausted or the
    /// shutdown flag is set. No pause follows the final bounded cycle.
    pub fn run(&mut self) {
        info!(
            "Watching {} symbol(s) every {}s",
            self.analyzers.len(),
            self.refresh_rate.as_secs()
        );

        while self.run_count.is_none_or(|remaining| remaining > 0) {
            if self.shutdown.load(Ordering::SeqCst) {
                info!("Shutdown requested, stopping market watch");
                break;
            }
            if let Err(e) = self.update_data() {
                warn!("Report for this cycle is incomplete: {}", e);
            }
            if let Some(remaining) = self.run_count.as_mut() {
                *remaining -= 1;
                if *remaining == 0 {
                    break;
                }
            }
            if self.pacer.pause(self.refresh_rate) == Pause::Interrupted {
                warn!("Sleep between cycles was interrupted");
            }
        }
        info!("Market watch stopped");
    }

    /// Moves the watch onto its own thread and starts `run` there.
    pub fn spawn(mut self) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name(String::from("market-watch"))
            .spawn(move || self.run())?;
        Ok(handle)
    }
}

/// Refreshes `analyzer` and builds its report row.
///
/// Any failed query fails the whole row, so a symbol is printed either as a complete
/// row or as an error line, never as a partial row.
fn poll_symbol(
    analyzer: &mut SymbolAnalyzer,
    directory: &dyn TickerDirectory,
    first_cycle: bool,
) -> Result<ReportRow> {
    analyzer.refresh()?;
    let symbol = analyzer.symbol().to_string();
    let company = directory
        .company_name(&symbol)
        .unwrap_or_else(|| symbol.clone());

    let since_last_check = if first_cycle {
        None
    } else {
        Some(analyzer.change_since_last_check()?)
    };

    let row = ReportRow {
        symbol,
        company,
        previous_close: analyzer.previous_close()?,
        current_price: analyzer.current_price()?,
        change: analyzer.change_since_close()?,
        percent_change: analyzer.percent_change_since_close()?,
        since_last_check,
    };

    if !first_cycle {
        analyzer.play_appropriate_audio();
    }
    Ok(row)
}

fn report_error(
    out: &mut (dyn Write + Send),
    audio_player: Option<&dyn AudioPlayer>,
    text: &str,
) -> io::Result<()> {
    error!("{}", text);
    if let Some(player) = audio_player {
        player.play_error();
    }
    writeln!(out, "Error: {}", text)
}

fn keep_first(slot: &mut Option<io::Error>, result: io::Result<()>) {
    if let Err(e) = result {
        error!("Failed to write report: {}", e);
        slot.get_or_insert(e);
    }
}
