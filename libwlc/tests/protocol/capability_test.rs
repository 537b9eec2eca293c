// capability_test.rs — WLCCAP decoding from raw tag content

#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use libwlc::protocol::codec;
use libwlc::test_support::capability_message;
use libwlc::{Error, ErrorCategory, ModeRequest};

#[test]
fn scenario_a_raw_bytes() {
    common::helpers::init_logging();
    let raw = fixtures::scenario_a_raw();
    assert_eq!(raw, fixtures::negotiated_capability());

    let cap = codec::parse_capability(&raw).unwrap();
    assert_eq!(cap.mode_request, ModeRequest::Negotiated);
    assert_eq!(cap.cap_wait_time_ms, 256);
    assert_eq!(cap.ndef_read_wait_ms, 2540);
    assert_eq!(cap.ndef_write_timeout_ms, 64);
    assert_eq!(cap.ndef_write_wait_ms, 0);
    assert_eq!(cap.max_nego_wait_cycles, 0);
}

#[test]
fn battery_full_and_static_modes() {
    let full = codec::parse_capability(&fixtures::battery_full_capability()).unwrap();
    assert_eq!(full.mode_request, ModeRequest::BatteryFull);
    let st = codec::parse_capability(&fixtures::static_capability()).unwrap();
    assert_eq!(st.mode_request, ModeRequest::Static);
}

#[test]
fn trailing_payload_bytes_are_ignored() {
    let msg = capability_message(&[0x10, 0x40, 0x05, 0x00, 0x01, 0x00, 0xAA, 0xBB]);
    let cap = codec::parse_capability(&msg).unwrap();
    assert_eq!(cap.cap_wait_time_ms, 256);
}

#[test]
fn errors_are_parse_category() {
    let cases: Vec<Vec<u8>> = vec![
        vec![],
        capability_message(&[0x10, 0x40, 0x05]),
        capability_message(&[0x20, 0x40, 0x05, 0x00, 0x01, 0x00]),
        capability_message(&[0x10, 0xC0, 0x05, 0x00, 0x01, 0x00]),
        fixtures::transfer_control(1, 0),
    ];
    for msg in cases {
        let err = codec::parse_capability(&msg).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Parse, "{}", err);
    }
    assert!(matches!(
        codec::parse_capability(&fixtures::transfer_control(1, 0)),
        Err(Error::UnexpectedRecordType { .. })
    ));
}
