// libwlc-rs/libwlc/src/transport/traits.rs

use std::sync::Arc;

use crate::types::VoltageKind;
use crate::Result;

/// Callback invoked by a tag link when its own presence check loses the
/// listener.
pub type LinkLostNotifier = Arc<dyn Fn() + Send + Sync>;

/// TagChannel abstracts the NDEF link to the charging listener.
pub trait TagChannel {
    /// Read the full NDEF message stored on the listener
    fn read_ndef(&mut self) -> Result<Vec<u8>>;

    /// Write an NDEF message to the listener
    fn write_ndef(&mut self, message: &[u8]) -> Result<()>;

    /// Start the link's own presence check with the given period
    fn start_presence_checking(&mut self, period_ms: u64, on_lost: LinkLostNotifier)
    -> Result<()>;

    /// Stop the link's presence check. `immediate` drops the callback
    /// without waiting for the current check.
    fn stop_presence_checking(&mut self, immediate: bool) -> Result<()>;

    /// Drop the tag link
    fn disconnect(&mut self) -> Result<()>;
}

/// RfFrontEnd is the single register transaction primitive of the NFC
/// controller (proprietary test commands).
pub trait RfFrontEnd {
    /// Send a vendor test command and return its response payload
    fn send_test_command(&mut self, group: u8, opcode: u8, payload: &[u8]) -> Result<Vec<u8>>;
}

/// Notifications about the charging session. Fire-and-forget: every
/// method has an empty default and nothing is returned to the caller.
pub trait ChargingEventSink {
    /// Listener appeared or disappeared
    fn on_listener_detected(&self, _present: bool) {}

    /// Charging started at the given Ptx
    fn on_established(&self, _power_level: u8) {}

    /// Listener reported a full battery
    fn on_battery_full(&self) {}

    /// Battery level from WLCCTL
    fn on_battery_level(&self, _percent: u8) {}

    /// Charging finished
    fn on_complete(&self) {}

    /// Voltage measured while adjusting power
    fn on_voltage_sample(&self, _kind: VoltageKind, _millivolts: u32) {}

    /// The session was ended explicitly (not by listener loss)
    fn on_stopped(&self) {}
}

/// Control over the host's discovery loop and safety features.
pub trait HostPollingControl {
    /// Stop the discovery loop while a session runs
    fn disable_discovery(&self);

    /// Resume discovery
    fn restart_polling(&self);

    /// Enable or disable foreign object detection
    fn start_stop_fod(&self, enable: bool);

    /// Whether several tags are in the field (forces static mode)
    fn is_multi_tag(&self) -> bool {
        false
    }

    /// Mute the other listen/poll technologies while charging.
    fn set_other_techs_muted(&self, _muted: bool) {}
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl ChargingEventSink for NullEventSink {}
