//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize WLC record construction and the mock wiring
//! of a state machine so tests across the crate and tests/ directory can
//! reuse the same logic.
#![allow(dead_code)]

use std::sync::Arc;

use crate::config::WlcConfig;
use crate::constants::{WLCCAP_TYPE, WLCCTL_TYPE, WLC_VERSION};
use crate::power::PowerAdjustmentController;
use crate::protocol::{NdefMessage, NdefRecord};
use crate::rf::{shared, RfRegisters};
use crate::session::WlcStateMachine;
use crate::transport::mock::{MockHost, MockRf, MockTag, RecordingSink};

/// Encode a single well-known record as a complete NDEF message.
#[doc(hidden)]
pub fn record_message(record_type: &[u8], payload: &[u8]) -> Vec<u8> {
    NdefMessage::encode(&[NdefRecord::well_known(record_type, payload)])
        .unwrap_or_default()
}

/// WLC_CAP message with the given payload bytes.
#[doc(hidden)]
pub fn capability_message(payload: &[u8]) -> Vec<u8> {
    record_message(WLCCAP_TYPE, payload)
}

/// WLC_CTL message with the given payload bytes.
#[doc(hidden)]
pub fn control_message(payload: &[u8]) -> Vec<u8> {
    record_message(WLCCTL_TYPE, payload)
}

/// WLC_CAP payload for a negotiated-mode listener without wait cycles or
/// read confirmation.
#[doc(hidden)]
pub fn negotiated_capability() -> Vec<u8> {
    capability_message(&[WLC_VERSION, 0x40, 0x05, 0x00, 0x01, 0x00])
}

/// WLC_CTL payload: counter, WPT request with duration exponent, power
/// adjust request.
#[doc(hidden)]
pub fn control(counter: u8, wpt: bool, duration_exp: u8, adjust: i8) -> Vec<u8> {
    let wpt_bits = if wpt { 0x40 } else { 0x00 };
    control_message(&[
        counter & 0x07,
        wpt_bits | ((duration_exp & 0x1F) << 1),
        adjust as u8,
        0x00,
        0x00,
        0x00,
    ])
}

/// Mock collaborators wired into a state machine.
#[doc(hidden)]
pub struct MockRig {
    pub tag: MockTag,
    pub rf: MockRf,
    pub host: MockHost,
    pub sink: RecordingSink,
}

impl MockRig {
    pub fn new() -> Self {
        Self {
            tag: MockTag::new(),
            rf: MockRf::new(),
            host: MockHost::new(),
            sink: RecordingSink::new(),
        }
    }

    pub fn controller(&self) -> PowerAdjustmentController {
        PowerAdjustmentController::new(
            RfRegisters::new(shared(self.rf.clone())),
            Arc::new(self.sink.clone()),
        )
    }

    pub fn machine(&self, config: WlcConfig) -> WlcStateMachine {
        WlcStateMachine::new(
            Box::new(self.tag.clone()),
            Arc::new(self.host.clone()),
            Arc::new(self.sink.clone()),
            self.controller(),
            config,
        )
    }
}

impl Default for MockRig {
    fn default() -> Self {
        Self::new()
    }
}
