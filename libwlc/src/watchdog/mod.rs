// libwlc-rs/libwlc/src/watchdog/mod.rs

/// Handle used to signal a running watchdog
pub mod handle;
/// Watchdog thread
pub mod runner;

pub use handle::{Command, ExitReason, WatchdogHandle};
pub use runner::spawn;
