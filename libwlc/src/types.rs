// libwlc-rs/libwlc/src/types.rs

use derive_more::Display;

use crate::constants::SEQUENCE_MODULO;
use crate::Error;
use std::convert::TryFrom;

/// Mode requested by the listener in WLCCAP (bits 7-6 of byte 1)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeRequest {
    /// Fixed power, no WLCCTL exchange
    Static,
    /// Power negotiated through WLCCTL
    Negotiated,
    /// Listener battery is already full
    BatteryFull,
}

impl TryFrom<u8> for ModeRequest {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            0 => Ok(Self::Static),
            1 => Ok(Self::Negotiated),
            2 => Ok(Self::BatteryFull),
            _ => Err(Error::ReservedModeRequest),
        }
    }
}

/// Battery status reported in WLCCTL (bits 4-3 of byte 0)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BatteryStatus {
    /// Not reported
    Unknown,
    /// Battery level field carries a valid percentage
    LevelReported,
    /// Battery full
    Full,
    /// Reserved encoding
    Reserved,
}

impl BatteryStatus {
    /// Decode the two status bits
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Unknown,
            1 => Self::LevelReported,
            2 => Self::Full,
            _ => Self::Reserved,
        }
    }
}

/// WLCCTL sequence counter, always in `0..8`
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceCounter(u8);

impl SequenceCounter {
    /// Counter from a raw value, reduced mod 8
    pub const fn new(value: u8) -> Self {
        Self(value % SEQUENCE_MODULO)
    }

    /// Raw counter value
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Counter value the listener is expected to send next
    pub fn next(&self) -> Self {
        Self::new(self.0 + 1)
    }
}

/// Reason reported by the controller's foreign-object detection
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FodReason {
    /// Listener signalled the stop pattern; power transfer pauses
    StopPattern,
    /// A foreign object was detected or the listener was removed
    DetectionOrRemoval,
    /// Controller reported a FOD error
    Error,
}

impl FodReason {
    /// Map the controller's FOD code
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::StopPattern,
            0x01 => Self::DetectionOrRemoval,
            _ => Self::Error,
        }
    }
}

/// Voltage rails sampled while charging
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum VoltageKind {
    /// Listener battery voltage
    Battery,
    /// DCDC output feeding the transmitter
    VddTx,
    /// LDO output feeding the RF driver
    VddRf,
}
