//! Audio cues played when the market moves or something fails.
//!
//! Every cue is fire-and-forget: `CuePlayer` spawns a detached thread per cue and
//! returns immediately. The threads share one mutex around the playback device, so
//! cues triggered close together play one after another instead of overlapping.
//! Playback failures (missing cue file, unavailable device) are logged and never
//! reach the caller.
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error};
use stock_common::{MarketError, Result};
use strum_macros::Display;

/// Sentiment signalled to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AudioCue {
    /// The symbol is up since the previous close.
    Happy,
    /// The symbol is down one percent or more.
    Sad,
    /// A quote or analysis failed.
    Error,
}

impl AudioCue {
    /// Sound file associated with the cue.
    pub fn file_name(self) -> &'static str {
        match self {
            AudioCue::Happy => "money.wav",
            AudioCue::Sad => "GRR.WAV",
            AudioCue::Error => "apollo-failureisnotanoption.wav",
        }
    }
}

/// Anything able to play the three cues. Calls must not block.
pub trait AudioPlayer: Send + Sync {
    /// Starts playing `cue` and returns immediately.
    fn play(&self, cue: AudioCue);

    /// Plays the happy cue.
    fn play_happy(&self) {
        self.play(AudioCue::Happy);
    }

    /// Plays the sad cue.
    fn play_sad(&self) {
        self.play(AudioCue::Sad);
    }

    /// Plays the error cue.
    fn play_error(&self) {
        self.play(AudioCue::Error);
    }
}

/// Output hardware a cue is rendered on.
pub trait CueDevice: Send + 'static {
    /// Writes the cue to the device.
    fn render(&mut self, cue: AudioCue) -> Result<()>;

    /// Blocks until everything rendered so far has been played.
    fn drain(&mut self) -> Result<()>;
}

/// Device that rings the terminal bell on stderr: once for happy, twice for sad,
/// three times for error.
#[derive(Debug, Clone)]
pub struct TerminalBell {
    gap: Duration,
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self {
            gap: Duration::from_millis(150),
        }
    }
}

impl TerminalBell {
    /// Number of bells rung for `cue`.
    pub fn rings(cue: AudioCue) -> usize {
        match cue {
            AudioCue::Happy => 1,
            AudioCue::Sad => 2,
            AudioCue::Error => 3,
        }
    }
}

impl CueDevice for TerminalBell {
    // stderr is shared with the logger, so it is only locked for a single ring.
    fn render(&mut self, cue: AudioCue) -> Result<()> {
        for ring in 0..Self::rings(cue) {
            if ring > 0 {
                thread::sleep(self.gap);
            }
            let mut stderr = io::stderr().lock();
            stderr.write_all(b"\x07")?;
            stderr.flush()?;
        }
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }
}

/// Fire-and-forget cue player serialising playback on a shared device.
pub struct CuePlayer<D: CueDevice> {
    device: Arc<Mutex<D>>,
    cues_dir: Option<PathBuf>,
}

impl<D: CueDevice> CuePlayer<D> {
    /// Creates a player rendering on `device`.
    pub fn new(device: D) -> Self {
        Self {
            device: Arc::new(Mutex::new(device)),
            cues_dir: None,
        }
    }

    /// Requires the cue's sound file to exist under `dir` before it is played.
    pub fn with_cues_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cues_dir = dir;
        self
    }

    /// Shared handle to the device.
    pub fn device(&self) -> Arc<Mutex<D>> {
        Arc::clone(&self.device)
    }

    /// Spawns the playback thread for `cue` and hands back its handle.
    pub fn play_detached(&self, cue: AudioCue) -> JoinHandle<()> {
        let device = Arc::clone(&self.device);
        let cue_file = self.cues_dir.as_ref().map(|dir| dir.join(cue.file_name()));
        thread::spawn(move || {
            if let Err(e) = play_cue(&device, cue, cue_file.as_deref()) {
                error!("Failed to play {} cue: {}", cue, e);
            }
        })
    }
}

impl<D: CueDevice> AudioPlayer for CuePlayer<D> {
    fn play(&self, cue: AudioCue) {
        let _ = self.play_detached(cue);
    }
}

fn play_cue<D: CueDevice>(device: &Mutex<D>, cue: AudioCue, cue_file: Option<&Path>) -> Result<()> {
    if let Some(path) = cue_file {
        if !path.is_file() {
            return Err(MarketError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Wave file not found: {}", path.display()),
            )));
        }
    }

    let mut device = device.lock()?;
    debug!("Playing {} cue", cue);
    device.render(cue)?;
    device.drain()
}
