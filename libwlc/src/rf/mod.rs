// libwlc-rs/libwlc/src/rf/mod.rs

pub mod config;
/// Charging mode switch
pub mod mode;
/// Typed register access
pub mod registers;

pub use mode::{enter_charging_mode, leave_charging_mode};
pub use registers::{shared, RfRegisters, SharedRfFrontEnd};
