//! Market watcher: polls quotes for a list of ticker symbols, prints a fixed-width
//! report every cycle and rings a cue reflecting each symbol's movement.
//!
//! Usage example (CLI):
//! ```bash
//! stock_watch 60 AAPL MSFT HOG
//! stock_watch 5 AAPL --source simulated --run-count 10
//! stock_watch 30 HOG --source file --format csv --quotes-dir ./quotes
//! ```
//!
//! The polling loop runs on its own thread. Ctrl+C flags shutdown and interrupts the
//! current pause, so the loop stops before its next cycle.
use std::sync::Arc;
use std::sync::atomic::Ordering;

use clap::Parser;
use log::{error, info};
use stock_common::{BuiltinListing, FileListing, MarketError, Result, TickerDirectory};
use stock_feed::FeedFactory;
use stock_watch::args::{Args, USAGE};
use stock_watch::{AudioPlayer, CuePlayer, MarketWatch, TerminalBell};

fn main() -> Result<(), MarketError> {
    init_logger();
    let args = Args::parse();

    let Some(refresh_rate) = args.refresh_interval() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let directory: Arc<dyn TickerDirectory> = match &args.tickers_file {
        Some(path) => {
            let listing = FileListing::from_path(path)?;
            info!("Loaded {} tickers from {}", listing.len(), path.display());
            Arc::new(listing)
        }
        None => Arc::new(BuiltinListing),
    };

    let audio_player: Option<Arc<dyn AudioPlayer>> = if args.mute {
        None
    } else {
        let player = CuePlayer::new(TerminalBell::default()).with_cues_dir(args.cues_dir.clone());
        Some(Arc::new(player) as Arc<dyn AudioPlayer>)
    };

    let factory = FeedFactory::new(args.feed_config())?;
    info!(
        "Quote source: {} ({}), endpoint template {}",
        factory.config().kind,
        factory.config().format,
        factory.config().endpoint()
    );

    let watch = MarketWatch::new(&args.symbols, &factory, audio_player, directory)
        .with_refresh_rate(refresh_rate)
        .with_run_count(args.run_count);

    if watch.tracked_symbols().is_empty() {
        error!("None of {:?} can be tracked", args.symbols);
        return Err(MarketError::NoSymbols);
    }
    info!("Tracking: {}", watch.tracked_symbols().join(", "));

    {
        let shutdown = watch.shutdown_flag();
        let interrupter = watch.interrupter();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down market watch...");
            shutdown.store(true, Ordering::SeqCst);
            let _ = interrupter.send(());
        })
        .map_err(|e| MarketError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let handle = watch.spawn()?;
    handle
        .join()
        .map_err(|_| MarketError::Format(String::from("market watch thread panicked")))?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
