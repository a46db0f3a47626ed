//! Interruptible pause between polling cycles.
//!
//! The pause waits on a crossbeam channel with a timeout, so another thread (the
//! Ctrl+C handler, a test) can cut it short by sending on the interrupter.
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};

/// How a pause ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// The full duration passed.
    Elapsed,
    /// An interrupt arrived before the duration passed.
    Interrupted,
}

/// Sleeps between cycles unless interrupted.
#[derive(Debug, Clone)]
pub struct Pacer {
    interrupt_tx: Sender<()>,
    interrupt_rx: Receiver<()>,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer {
    /// Creates a pacer with its own interrupt channel.
    pub fn new() -> Self {
        let (interrupt_tx, interrupt_rx) = unbounded::<()>();
        Self {
            interrupt_tx,
            interrupt_rx,
        }
    }

    /// Sender that interrupts the current (or next) pause.
    pub fn interrupter(&self) -> Sender<()> {
        self.interrupt_tx.clone()
    }

    /// Blocks for `duration` or until interrupted.
    pub fn pause(&self, duration: Duration) -> Pause {
        match self.interrupt_rx.recv_timeout(duration) {
            Ok(()) => Pause::Interrupted,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Pause::Elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn pause_runs_full_duration_without_interrupt() {
        let pacer = Pacer::new();
        let start = Instant::now();
        assert_eq!(pacer.pause(Duration::from_millis(20)), Pause::Elapsed);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn interrupt_cuts_pause_short() {
        let pacer = Pacer::new();
        let interrupter = pacer.interrupter();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            interrupter.send(()).unwrap();
        });
        let start = Instant::now();
        assert_eq!(pacer.pause(Duration::from_secs(30)), Pause::Interrupted);
        assert!(start.elapsed() < Duration::from_secs(30));
    }
}
