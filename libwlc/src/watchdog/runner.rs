// libwlc-rs/libwlc/src/watchdog/runner.rs

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, TryRecvError};
use log::{debug, error, info, warn};

use super::handle::{Command, ExitReason, WatchdogHandle};
use crate::rf;
use crate::session::{Step, Verdict, WlcStateMachine};
use crate::Result;

/// Start the watchdog thread driving `machine`. The first step runs after
/// `initial_delay`.
pub fn spawn(mut machine: WlcStateMachine, initial_delay: Duration) -> Result<WatchdogHandle> {
    let (tx, rx) = channel::unbounded();
    let running = Arc::new(AtomicBool::new(true));

    let lost_tx = tx.clone();
    machine.set_link_lost_notifier(Arc::new(move || {
        let _ = lost_tx.send(Command::Lost);
    }));

    let runner = Runner {
        machine,
        rx,
        _running: RunningFlag(running.clone()),
        disable_callback: false,
    };
    let thread = thread::Builder::new()
        .name("wlc-watchdog".into())
        .spawn(move || runner.run(initial_delay))?;
    Ok(WatchdogHandle::new(tx, running, thread))
}

/// Clears the running flag when the thread is done, teardown included.
struct RunningFlag(Arc<AtomicBool>);

impl Drop for RunningFlag {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct Runner {
    machine: WlcStateMachine,
    rx: Receiver<Command>,
    _running: RunningFlag,
    disable_callback: bool,
}

impl Runner {
    fn run(mut self, initial_delay: Duration) -> ExitReason {
        info!("watchdog started");
        let mut timeout = initial_delay;
        let reason = loop {
            match self.wait(timeout) {
                Some(Command::Lost) => break ExitReason::Lost,
                Some(Command::Full) => break ExitReason::Full,
                Some(Command::Stop { disable_callback }) => {
                    self.disable_callback = disable_callback;
                    break ExitReason::Stopped;
                }
                Some(Command::Fod(reason)) => self.machine.on_fod(reason),
                Some(Command::ForceStep) | None => {}
            }

            match self.step() {
                Some(step) => match step.verdict {
                    Verdict::Continue => timeout = Duration::from_millis(step.timeout_ms),
                    Verdict::Lost => break ExitReason::Lost,
                    Verdict::Full => break ExitReason::Full,
                },
                None => break ExitReason::Failed,
            }
        };
        self.teardown(reason);
        reason
    }

    /// Wait for a command or the timeout; a zero timeout only polls.
    fn wait(&self, timeout: Duration) -> Option<Command> {
        if timeout.is_zero() {
            return match self.rx.try_recv() {
                Ok(cmd) => Some(cmd),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
            };
        }
        match self.rx.recv_timeout(timeout) {
            Ok(cmd) => Some(cmd),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                None
            }
        }
    }

    fn step(&mut self) -> Option<Step> {
        let state = self.machine.state();
        match panic::catch_unwind(AssertUnwindSafe(|| self.machine.step())) {
            Ok(Ok(step)) => Some(step),
            Ok(Err(e)) => {
                warn!("step {} failed ({:?}): {}", state, e.category(), e);
                None
            }
            Err(_) => {
                error!("step {} panicked", state);
                None
            }
        }
    }

    fn teardown(&mut self, reason: ExitReason) {
        debug!("watchdog teardown: {:?}", reason);
        self.machine.power_mut().reset_defaults();

        let tag = self.machine.tag_mut();
        if let Err(e) = tag.stop_presence_checking(self.disable_callback) {
            warn!("presence check stop failed: {}", e);
        }
        if let Err(e) = tag.disconnect() {
            warn!("tag disconnect failed: {}", e);
        }

        if reason == ExitReason::Stopped {
            self.machine.events().on_stopped();
        }

        let host = self.machine.host().clone();
        rf::leave_charging_mode(&*host, self.machine.power_mut());
        info!("watchdog finished: {:?}", reason);
    }
}
