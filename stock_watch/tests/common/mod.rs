//! Fakes shared by the integration tests.
#![allow(dead_code)]
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use stock_common::{MarketError, QuoteRecord, QuoteSource, QuoteSourceFactory, Result};
use stock_watch::{AudioCue, AudioPlayer};

/// Source replaying a fixed list of results, then failing.
pub struct ScriptedSource(VecDeque<Result<QuoteRecord>>);

impl QuoteSource for ScriptedSource {
    fn fetch(&mut self, symbol: &str) -> Result<QuoteRecord> {
        self.0.pop_front().unwrap_or_else(|| {
            Err(MarketError::Connection(format!("no more quotes for {}", symbol)))
        })
    }
}

/// Factory handing out one scripted source per symbol; unknown symbols get none.
#[derive(Default)]
pub struct ScriptedFactory {
    scripts: RefCell<HashMap<String, Vec<Result<QuoteRecord>>>>,
}

impl ScriptedFactory {
    pub fn script(self, symbol: &str, results: Vec<Result<QuoteRecord>>) -> Self {
        self.scripts.borrow_mut().insert(symbol.to_string(), results);
        self
    }
}

impl QuoteSourceFactory for ScriptedFactory {
    fn create_source(&self, symbol: &str) -> Option<Box<dyn QuoteSource>> {
        self.scripts
            .borrow_mut()
            .remove(&symbol.trim().to_ascii_uppercase())
            .map(|results| Box::new(ScriptedSource(results.into())) as Box<dyn QuoteSource>)
    }
}

/// Audio player remembering every cue.
#[derive(Default)]
pub struct RecordingPlayer {
    cues: Mutex<Vec<AudioCue>>,
}

impl RecordingPlayer {
    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues.lock().unwrap().clone()
    }
}

impl AudioPlayer for RecordingPlayer {
    fn play(&self, cue: AudioCue) {
        self.cues.lock().unwrap().push(cue);
    }
}

/// Report sink readable after the watch has written to it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Report sink whose every write fails.
pub struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}

pub fn quote(symbol: &str, close: f64, last: f64, change: f64) -> Result<QuoteRecord> {
    QuoteRecord::new(symbol, close, last, change)
}

pub fn outage() -> Result<QuoteRecord> {
    Err(MarketError::Connection(String::from("host unreachable")))
}
