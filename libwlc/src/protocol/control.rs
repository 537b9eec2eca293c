// libwlc-rs/libwlc/src/protocol/control.rs

use crate::constants::{
    MAX_BATTERY_LEVEL, MAX_HOLD_OFF_EXPONENT, MAX_TIME_EXPONENT, POWER_ADJUST_MAX_RAISE,
    POWER_ADJUST_MIN_LOWER, WLCCTL_MIN_PAYLOAD_LEN, WLCCTL_TYPE,
};
use crate::protocol::parser::{self, bits, pow2_ms};
use crate::protocol::record::NdefRecord;
use crate::types::{BatteryStatus, SequenceCounter};
use crate::Result;

/// Decoded WLC_CTL record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WlcControl {
    /// Listener reported an error
    pub error_flag: bool,
    /// Meaning of the battery level byte
    pub battery_status: BatteryStatus,
    /// Incremented by the listener for every new WLCCTL
    pub sequence_counter: SequenceCounter,
    /// Power transfer requested
    pub wpt_requested: bool,
    /// T_WPT
    pub wpt_duration_ms: u64,
    /// A WLCINF must follow the transfer
    pub wpt_info_requested: bool,
    /// Requested power change in 5 % units, `-10..=20`
    pub power_adjust_request: i8,
    /// Battery level, when reported and valid
    pub battery_level_percent: Option<u8>,
    /// Hold-off time after the transfer
    pub hold_off_wait_ms: u64,
}

impl WlcControl {
    /// Layout: status(1) + wpt(1) + power_adj(1) + battery_level(1)
    /// + reserved(1) + hold_off(1)
    pub fn parse(record: &NdefRecord) -> Result<Self> {
        super::expect_record_type(record, WLCCTL_TYPE)?;
        let p = &record.payload;
        parser::ensure_len(p, WLCCTL_MIN_PAYLOAD_LEN)?;

        let status = parser::byte_at(p, 0)?;
        let battery_status = BatteryStatus::from_bits(bits(status, 3, 2));

        let wpt = parser::byte_at(p, 1)?;
        let wpt_requested = bits(wpt, 6, 2) == 1;
        let duration_exp = bits(wpt, 1, 5).min(MAX_TIME_EXPONENT);
        let wpt_info_requested = wpt_requested && bits(wpt, 0, 1) == 1;

        // Literal unsigned comparison; accepted bytes are then read as i8.
        let adj = parser::byte_at(p, 2)?;
        let power_adjust_request = if adj <= POWER_ADJUST_MAX_RAISE || adj >= POWER_ADJUST_MIN_LOWER
        {
            adj as i8
        } else {
            0
        };

        let level = parser::byte_at(p, 3)?;
        let battery_level_percent = (level <= MAX_BATTERY_LEVEL
            && battery_status == BatteryStatus::LevelReported)
            .then_some(level);

        let hold_off_exp = parser::byte_at(p, 5)?.min(MAX_HOLD_OFF_EXPONENT);

        Ok(Self {
            error_flag: bits(status, 7, 1) == 1,
            battery_status,
            sequence_counter: SequenceCounter::new(bits(status, 0, 3)),
            wpt_requested,
            wpt_duration_ms: pow2_ms(duration_exp, 3),
            wpt_info_requested,
            power_adjust_request,
            battery_level_percent,
            hold_off_wait_ms: pow2_ms(hold_off_exp, 3),
        })
    }
}
