// libwlc-rs/libwlc/src/power/mod.rs

/// Applies power plans to the RF registers
pub mod controller;
pub mod model;
/// Register-level power trims
pub mod state;

pub use controller::PowerAdjustmentController;
pub use model::{AdjustmentPlan, Calibration, Plan};
pub use state::PowerState;
