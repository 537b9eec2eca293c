// libwlc-rs/libwlc/src/session/mod.rs

/// State machine driver
pub mod machine;
/// Per-session bookkeeping
#[allow(clippy::module_inception)]
pub mod session;
/// State enum
pub mod state;

pub use machine::{Step, Verdict, WlcStateMachine};
pub use session::{RetryCounters, WlcSession};
pub use state::WlcState;
