// fixtures.rs — WLC records used across the integration tests

use libwlc::test_support::{capability_message, control};

/// Negotiated mode, T_CAP_WT exponent 5, default read wait
pub const SCENARIO_A_CAP: [u8; 6] = [0x10, 0b01 << 6, 0x05, 0x00, 0x01, 0x00];

/// The Scenario A capability as it appears on the tag: short well-known
/// record `WLCCAP` holding `SCENARIO_A_CAP`.
pub fn scenario_a_raw() -> Vec<u8> {
    hex::decode("d10606574c43434150104005000100").unwrap()
}

pub fn negotiated_capability() -> Vec<u8> {
    capability_message(&SCENARIO_A_CAP)
}

pub fn static_capability() -> Vec<u8> {
    capability_message(&[0x10, 0x00, 0x05, 0x00, 0x01, 0x00])
}

pub fn battery_full_capability() -> Vec<u8> {
    capability_message(&[0x10, 0b10 << 6, 0x05, 0x00, 0x01, 0x00])
}

/// WLC_CTL requesting power for 2^(2+3) = 32 ms
pub fn transfer_control(counter: u8, adjust: i8) -> Vec<u8> {
    control(counter, true, 2, adjust)
}

/// WLC_CTL without a power-transfer request, T_WPT = 2^(exp+3)
pub fn idle_control(counter: u8, duration_exp: u8) -> Vec<u8> {
    control(counter, false, duration_exp, 0)
}
