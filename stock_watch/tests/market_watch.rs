//! Behaviour of the polling loop across cycles, driven through the public API with
//! scripted quote sources.
mod common;

use std::fs;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{BrokenSink, RecordingPlayer, ScriptedFactory, SharedBuffer, outage, quote};
use stock_common::{BuiltinListing, PayloadFormat, TickerDirectory};
use stock_feed::{FeedConfig, FeedFactory, FeedKind};
use stock_watch::report::BANNER_WIDTH;
use stock_watch::{AudioCue, AudioPlayer, MarketWatch};

fn directory() -> Arc<dyn TickerDirectory> {
    Arc::new(BuiltinListing)
}

fn watch(
    symbols: &[&str],
    factory: &ScriptedFactory,
) -> (MarketWatch, SharedBuffer, Arc<RecordingPlayer>) {
    let buffer = SharedBuffer::default();
    let player = Arc::new(RecordingPlayer::default());
    let audio: Arc<dyn AudioPlayer> = player.clone();
    let watch = MarketWatch::with_output(
        symbols,
        factory,
        Some(audio),
        directory(),
        Box::new(buffer.clone()),
    );
    (watch, buffer, player)
}

fn rows_for<'a>(text: &'a str, symbol: &str) -> Vec<&'a str> {
    let tag = format!("({:>5})", symbol);
    text.lines().filter(|line| line.contains(&tag)).collect()
}

fn banner_count(text: &str) -> usize {
    let banner = "#".repeat(BANNER_WIDTH);
    text.lines().filter(|line| *line == banner).count()
}

#[test]
fn startup_drops_untrackable_symbols_and_keeps_order() {
    let factory = ScriptedFactory::default()
        .script("HOG", vec![])
        .script("CBD", vec![]);

    let (watch, buffer, player) = watch(&["HOG", "ZZZZZZZZZ", "AAPL", "cbd"], &factory);

    assert_eq!(watch.tracked_symbols(), vec!["HOG", "CBD"]);
    let text = buffer.text();
    assert!(text.contains("Error: Symbol ZZZZZZZZZ not found."));
    assert!(text.contains("Error: The source for stock quotes can not be absent (symbol AAPL)"));
    assert_eq!(player.cues(), vec![AudioCue::Error, AudioCue::Error]);
}

#[test]
fn first_cycle_reports_prices_only_and_second_adds_delta_and_cues() {
    let factory = ScriptedFactory::default()
        .script(
            "HOG",
            vec![quote("HOG", 100.0, 102.0, 2.0), quote("HOG", 100.0, 98.5, -1.5)],
        )
        .script(
            "CBD",
            vec![quote("CBD", 35.5, 40.0, 5.0), quote("CBD", 35.5, 43.2, 8.2)],
        );
    let (mut watch, buffer, player) = watch(&["HOG", "CBD"], &factory);
    assert!(watch.is_first_cycle());

    watch.update_data().unwrap();
    assert!(!watch.is_first_cycle());
    let text = buffer.text();
    let hog = rows_for(&text, "HOG");
    let cbd = rows_for(&text, "CBD");
    assert_eq!(hog.len(), 1);
    assert!(hog[0].contains("Harley-Davidson, Inc."));
    assert!(hog[0].ends_with('%'));
    assert!(cbd[0].ends_with("  14.08%"));
    assert!(player.cues().is_empty());

    watch.update_data().unwrap();
    let text = buffer.text();
    let hog = rows_for(&text, "HOG");
    let cbd = rows_for(&text, "CBD");
    assert_eq!(hog.len(), 2);
    assert!(hog[1].ends_with("\t  $  -3.50"));
    assert!(cbd[1].ends_with("\t  $   3.20"));
    assert_eq!(player.cues(), vec![AudioCue::Sad, AudioCue::Happy]);
    assert_eq!(banner_count(&text), 4);
}

#[test]
fn one_failing_symbol_does_not_stop_the_cycle() {
    let factory = ScriptedFactory::default()
        .script("HOG", vec![outage(), quote("HOG", 100.0, 101.0, 1.0)])
        .script(
            "CBD",
            vec![quote("CBD", 35.5, 40.0, 5.0), quote("CBD", 35.5, 43.2, 8.2)],
        );
    let (mut watch, buffer, player) = watch(&["HOG", "CBD"], &factory);

    watch.update_data().unwrap();
    let text = buffer.text();
    assert!(text.contains("Error: Unable to connect with stock ticker source: host unreachable"));
    assert_eq!(rows_for(&text, "CBD").len(), 1);
    assert!(rows_for(&text, "HOG").is_empty());
    assert_eq!(player.cues(), vec![AudioCue::Error]);

    // HOG now has a single sample, so its delta column cannot be filled.
    watch.update_data().unwrap();
    let text = buffer.text();
    assert!(text.contains("Error: Fewer than two quotes have been retrieved."));
    assert_eq!(rows_for(&text, "CBD").len(), 2);
    assert_eq!(
        player.cues(),
        vec![AudioCue::Error, AudioCue::Error, AudioCue::Happy]
    );
}

#[test]
fn zero_close_is_reported_as_an_analysis_error_and_the_cycle_continues() {
    let factory = ScriptedFactory::default()
        .script("HOG", vec![quote("HOG", 0.0, 57.21, 0.89)])
        .script("CBD", vec![quote("CBD", 35.5, 40.0, 5.0)]);
    let (mut watch, buffer, player) = watch(&["HOG", "CBD"], &factory);

    watch.update_data().unwrap();

    let text = buffer.text();
    assert!(text.contains("Error: Invalid analysis state"));
    assert!(rows_for(&text, "HOG").is_empty());
    assert_eq!(rows_for(&text, "CBD").len(), 1);
    assert_eq!(player.cues(), vec![AudioCue::Error]);
}

#[test]
fn failing_sink_does_not_cut_the_cycle_short() {
    let factory = ScriptedFactory::default()
        .script("HOG", vec![quote("HOG", 100.0, 102.0, 2.0)])
        .script("CBD", vec![quote("CBD", 35.5, 40.0, 5.0)]);
    let mut watch = MarketWatch::with_output(
        &["HOG", "CBD"],
        &factory,
        None,
        directory(),
        Box::new(BrokenSink),
    );

    let err = watch.update_data().unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
    assert!(!watch.is_first_cycle());
    for analyzer in watch.analyzers() {
        assert!(analyzer.current_price().is_ok(), "{} was not refreshed", analyzer.symbol());
    }
}

#[test]
fn bounded_run_stops_after_run_count_cycles() {
    let factory = ScriptedFactory::default().script(
        "CBD",
        vec![quote("CBD", 35.5, 40.0, 5.0), quote("CBD", 35.5, 43.2, 8.2)],
    );
    let (watch, buffer, _player) = watch(&["CBD"], &factory);
    let mut watch = watch
        .with_refresh_rate(Duration::ZERO)
        .with_run_count(Some(2));

    watch.run();

    assert_eq!(watch.run_count(), Some(0));
    assert!(!watch.is_first_cycle());
    assert_eq!(banner_count(&buffer.text()), 4);
}

#[test]
fn interrupted_pause_is_not_fatal() {
    let factory = ScriptedFactory::default().script(
        "CBD",
        vec![quote("CBD", 35.5, 40.0, 5.0), quote("CBD", 35.5, 43.2, 8.2)],
    );
    let (watch, buffer, _player) = watch(&["CBD"], &factory);
    let mut watch = watch
        .with_refresh_rate(Duration::from_secs(3600))
        .with_run_count(Some(2));

    watch.interrupter().send(()).unwrap();
    watch.run();

    assert_eq!(rows_for(&buffer.text(), "CBD").len(), 2);
}

#[test]
fn shutdown_flag_stops_before_next_cycle() {
    let factory = ScriptedFactory::default().script("CBD", vec![quote("CBD", 35.5, 40.0, 5.0)]);
    let (mut watch, buffer, _player) = watch(&["CBD"], &factory);

    watch.shutdown_flag().store(true, Ordering::SeqCst);
    watch.run();

    assert!(buffer.text().is_empty());
    assert!(watch.is_first_cycle());
}

#[test]
fn spawned_watch_runs_on_its_own_thread() {
    let factory = ScriptedFactory::default().script("CBD", vec![quote("CBD", 35.5, 40.0, 5.0)]);
    let (watch, buffer, _player) = watch(&["CBD"], &factory);

    let handle = watch.with_run_count(Some(1)).spawn().unwrap();
    handle.join().unwrap();

    assert_eq!(rows_for(&buffer.text(), "CBD").len(), 1);
}

#[test]
fn file_feed_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("HOG.csv");
    fs::write(&payload, "\"HOG\",57.21,\"10/20/2008\",\"4:00pm\",+0.89\n").unwrap();

    let factory = FeedFactory::new(FeedConfig {
        kind: FeedKind::File,
        format: PayloadFormat::Csv,
        quotes_dir: Some(dir.path().to_path_buf()),
        ..FeedConfig::default()
    })
    .unwrap();
    let buffer = SharedBuffer::default();
    let mut watch = MarketWatch::with_output(
        &["HOG", "CBD"],
        &factory,
        None,
        directory(),
        Box::new(buffer.clone()),
    );

    watch.update_data().unwrap();
    fs::write(&payload, "\"HOG\",58.21,\"10/20/2008\",\"4:01pm\",+1.89\n").unwrap();
    watch.update_data().unwrap();

    let text = buffer.text();
    let hog = rows_for(&text, "HOG");
    assert_eq!(hog.len(), 2);
    assert!(hog[1].ends_with("\t  $   1.00"));
    // No CBD payload on disk: reported as a connection error on every cycle.
    assert_eq!(text.matches("Error: Unable to connect").count(), 2);
}
