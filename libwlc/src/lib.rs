// libwlc-rs/libwlc/src/lib.rs

//! libwlc
//!
//! NFC Forum Wireless Charging (WLC) poller control loop in pure Rust:
//! WLC record codec, the poller state machine, closed-loop transmit power
//! control and the per-session watchdog.

#![warn(missing_docs)]

/// Host-facing charging manager
pub mod charging;
/// Timing configuration of the charging loop
pub mod config;
/// WLC protocol constants
pub mod constants;
/// Crate error type
pub mod error;
/// Transmit power model and controller
pub mod power;
/// Common re-exports
pub mod prelude;
/// NDEF and WLC record codec
pub mod protocol;
/// RF front-end registers and charging mode
pub mod rf;
/// Poller state machine
pub mod session;
#[doc(hidden)]
pub mod test_support;
/// Collaborator traits and in-memory mocks
pub mod transport;
/// Small protocol value types
pub mod types;
/// Logging helpers
pub mod utils;
/// Per-session watchdog thread
pub mod watchdog;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the small value types in `types` are available everywhere.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
