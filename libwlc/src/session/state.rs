// libwlc-rs/libwlc/src/session/state.rs

use derive_more::Display;

/// States of the poller side of the WLC protocol.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WlcState {
    /// Read WLCCAP and decide on the mode
    #[default]
    Idle,
    /// WLCCAP requested static mode; set up fixed power
    StaticSetup,
    /// WLCCAP requested negotiated mode; wait cycles run here
    NegotiationSetup,
    /// Write WLCINF (WLCPI) with the current Ptx
    InfoSend,
    /// Read WLCCTL
    ControlRead,
    /// Acknowledge the control read with an empty NDEF message
    ReadConfirm,
    /// Start delivering power for T_WPT
    PowerTransfer,
    /// Apply the WLCCTL power-adjust request
    PowerAdjust,
    /// Power is being transferred for T_WPT
    PowerHold,
    /// No transfer requested; only watch for presence
    PresenceExtended,
    /// Power paused by the listener's stop pattern
    FodStopPattern,
    /// Foreign object or removal; the session is torn down
    FodRemoval,
}

impl WlcState {
    /// Whether the state can only be reached through a FOD notification
    pub fn is_fod(&self) -> bool {
        matches!(self, WlcState::FodStopPattern | WlcState::FodRemoval)
    }
}
