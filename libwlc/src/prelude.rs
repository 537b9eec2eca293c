// libwlc-rs/libwlc/src/prelude.rs

pub use crate::charging::NfcCharging;
pub use crate::config::WlcConfig;
pub use crate::power::{Calibration, PowerAdjustmentController, PowerState};
pub use crate::protocol::{WlcCapability, WlcControl, WlcInfo};
pub use crate::rf::{shared, RfRegisters, SharedRfFrontEnd};
pub use crate::session::{Step, Verdict, WlcState, WlcStateMachine};
pub use crate::transport::{ChargingEventSink, HostPollingControl, RfFrontEnd, TagChannel};
pub use crate::watchdog::{ExitReason, WatchdogHandle};
pub use crate::{
    BatteryStatus, Error, ErrorCategory, FodReason, ModeRequest, Result, SequenceCounter,
    VoltageKind,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};
