// libwlc-rs/libwlc/src/watchdog/handle.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::Sender;
use log::debug;
use parking_lot::Mutex;

use crate::types::FodReason;

/// Commands accepted by a running watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Listener gone
    Lost,
    /// Listener battery full
    Full,
    /// Explicit stop; `disable_callback` skips the presence-stop callback
    Stop { disable_callback: bool },
    /// Run the next step now instead of waiting for the timeout
    ForceStep,
    /// FOD interrupt
    Fod(FodReason),
}

/// Why a watchdog loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The listener was lost
    Lost,
    /// The listener reported a full battery
    Full,
    /// Ended through [`WatchdogHandle::end`]
    Stopped,
    /// A step returned an error or panicked
    Failed,
}

/// Handle to the watchdog thread of one charging session.
///
/// Every signal is a message on the watchdog's channel; once the loop has
/// finished they are silently dropped.
pub struct WatchdogHandle {
    tx: Sender<Command>,
    running: Arc<AtomicBool>,
    thread: Mutex<Option<JoinHandle<ExitReason>>>,
}

impl WatchdogHandle {
    pub(crate) fn new(
        tx: Sender<Command>,
        running: Arc<AtomicBool>,
        thread: JoinHandle<ExitReason>,
    ) -> Self {
        Self {
            tx,
            running,
            thread: Mutex::new(Some(thread)),
        }
    }

    fn send(&self, cmd: Command) {
        if self.tx.send(cmd).is_err() {
            debug!("watchdog gone, dropping {:?}", cmd);
        }
    }

    /// The listener is gone; end the session.
    pub fn lost(&self) {
        self.send(Command::Lost);
    }

    /// The listener's battery is full; end the session.
    pub fn full(&self) {
        self.send(Command::Full);
    }

    /// Stop the session. With `disable_callback` the tag's presence check
    /// is dropped immediately during teardown.
    pub fn end(&self, disable_callback: bool) {
        self.send(Command::Stop { disable_callback });
    }

    /// Run the next step without waiting.
    pub fn force_step(&self) {
        self.send(Command::ForceStep);
    }

    /// Interrupt the session with a FOD event.
    pub fn notify_fod(&self, reason: FodReason) {
        self.send(Command::Fod(reason));
    }

    /// Whether the loop or its teardown is still running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Wait for the loop and its teardown to finish. Returns `None` when
    /// already joined or when the thread panicked.
    pub fn join(&self) -> Option<ExitReason> {
        let thread = self.thread.lock().take()?;
        thread.join().ok()
    }
}

impl Drop for WatchdogHandle {
    fn drop(&mut self) {
        // a dropped handle ends its session
        if self.is_running() {
            self.send(Command::Stop {
                disable_callback: true,
            });
        }
    }
}
