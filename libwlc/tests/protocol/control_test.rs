// control_test.rs — WLCCTL decoding and the WLCINF reply

#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libwlc::protocol::{codec, WlcInfo};
use libwlc::test_support::control_message;
use libwlc::BatteryStatus;

#[test]
fn transfer_request_fields() {
    let ctl = codec::parse_control(&fixtures::transfer_control(3, -2)).unwrap();
    assert_eq!(ctl.sequence_counter.as_u8(), 3);
    assert!(ctl.wpt_requested);
    assert_eq!(ctl.wpt_duration_ms, 32);
    assert_eq!(ctl.power_adjust_request, -2);
    assert!(!ctl.wpt_info_requested);
    assert_eq!(ctl.battery_level_percent, None);
}

#[test]
fn idle_request_duration() {
    let ctl = codec::parse_control(&fixtures::idle_control(0, 9)).unwrap();
    assert!(!ctl.wpt_requested);
    assert_eq!(ctl.wpt_duration_ms, 4096);
}

#[test]
fn battery_level_reported() {
    // level reported, counter 6, level 77 %
    let ctl = codec::parse_control(&control_message(&[0x0E, 0x00, 0x00, 77, 0x00, 0x00])).unwrap();
    assert_eq!(ctl.battery_status, BatteryStatus::LevelReported);
    assert_eq!(ctl.sequence_counter.as_u8(), 6);
    assert_eq!(ctl.battery_level_percent, Some(77));
}

#[test]
fn out_of_range_adjust_becomes_zero() {
    for raw in [0x15u8, 0x7F, 0x80, 0xF5] {
        let msg = control_message(&[0x00, 0x40, raw, 0x00, 0x00, 0x00]);
        assert_eq!(codec::parse_control(&msg).unwrap().power_adjust_request, 0);
    }
}

#[test]
fn info_message_layout() {
    let msg = codec::encode_info_message(&WlcInfo::with_ptx(85)).unwrap();
    assert_eq!(
        hex::encode(&msg),
        format!("d10606{}550000000000", hex::encode(b"WLCINF"))
    );
    assert_eq!(codec::encode_ack_message().unwrap(), hex::decode("d00000").unwrap());
}
