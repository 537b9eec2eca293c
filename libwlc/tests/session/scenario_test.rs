// scenario_test.rs — end-to-end state machine runs over mock collaborators

#[path = "../common/mod.rs"]
mod common;

use anyhow::Result;
use common::fixtures;
use libwlc::test_support::MockRig;
use libwlc::transport::mock::Event;
use libwlc::{Verdict, WlcConfig, WlcState};

#[test]
fn scenario_a_negotiated_start() -> Result<()> {
    common::helpers::init_logging();
    let rig = MockRig::new();
    let mut m = rig.machine(WlcConfig::default());
    rig.tag.push_read(fixtures::scenario_a_raw());

    let s = m.step()?;
    assert_eq!((s.next, s.timeout_ms), (WlcState::NegotiationSetup, 5));
    assert_eq!(m.capability().map(|c| c.cap_wait_time_ms), Some(256));
    let s = m.step()?;
    assert_eq!(s.next, WlcState::InfoSend);
    let s = m.step()?;
    // T_NDEF_RD_WT defaults to 2540 ms
    assert_eq!((s.next, s.timeout_ms), (WlcState::ControlRead, 2540));
    assert_eq!(rig.sink.events(), vec![Event::ListenerDetected(true)]);
    Ok(())
}

#[test]
fn scenario_b_stuck_counter_never_transfers() -> Result<()> {
    let rig = MockRig::new();
    let mut m = rig.machine(WlcConfig::default());
    rig.tag.push_read(fixtures::negotiated_capability());
    rig.tag.push_read(fixtures::transfer_control(3, 0));
    for _ in 0..4 {
        rig.tag.push_read(fixtures::idle_control(3, 2));
    }

    // Idle, NegotiationSetup, InfoSend, ControlRead, PowerTransfer,
    // PowerAdjust, PowerHold
    for _ in 0..7 {
        assert_eq!(m.step()?.verdict, Verdict::Continue);
    }
    assert_eq!(m.state(), WlcState::ControlRead);

    let mut visited = Vec::new();
    for retry in 1..=3u8 {
        let s = m.step()?;
        assert_eq!((s.next, s.timeout_ms), (WlcState::ControlRead, 30));
        assert_eq!(m.session().retry.read_confirm, retry);
        visited.push(s.next);
    }
    let s = m.step()?;
    visited.push(s.next);
    assert_eq!((s.next, s.verdict), (WlcState::Idle, Verdict::Lost));
    assert!(!visited.contains(&WlcState::PowerTransfer));
    assert_eq!(m.state(), WlcState::Idle);
    assert_eq!(m.session().retry.read_confirm, 0);
    assert!(!m.session().charging_active);
    assert_eq!(rig.tag.reads_remaining(), 0);
    Ok(())
}

#[test]
fn scenario_c_battery_full_on_first_read() -> Result<()> {
    let rig = MockRig::new();
    let mut m = rig.machine(WlcConfig::default());
    rig.tag.push_read(fixtures::battery_full_capability());

    let s = m.step()?;
    assert_eq!(s.next, WlcState::PresenceExtended);
    assert_eq!(s.timeout_ms, 256);
    assert_eq!(s.verdict, Verdict::Full);
    assert_eq!(
        rig.sink.events(),
        vec![
            Event::ListenerDetected(true),
            Event::BatteryFull,
            Event::Complete
        ]
    );
    Ok(())
}

#[test]
fn counter_advance_resets_duplicate_retries() -> Result<()> {
    let rig = MockRig::new();
    let mut m = rig.machine(WlcConfig::default());
    rig.tag.push_read(fixtures::negotiated_capability());
    rig.tag.push_read(fixtures::transfer_control(1, 0));
    rig.tag.push_read(fixtures::transfer_control(1, 0));
    rig.tag.push_read(fixtures::transfer_control(2, 0));

    for _ in 0..7 {
        m.step()?;
    }
    let s = m.step()?;
    assert_eq!(s.next, WlcState::ControlRead);
    assert_eq!(m.session().retry.read_confirm, 1);
    let s = m.step()?;
    assert_eq!(s.next, WlcState::PowerTransfer);
    assert_eq!(m.session().retry.read_confirm, 0);
    assert_eq!(
        m.session().sequence_counter_seen.map(|c| c.as_u8()),
        Some(2)
    );
    Ok(())
}

#[test]
fn listener_removed_mid_session() -> Result<()> {
    let rig = MockRig::new();
    let mut m = rig.machine(WlcConfig::default());
    rig.tag.push_read(fixtures::negotiated_capability());

    for _ in 0..3 {
        m.step()?;
    }
    // nothing left on the tag
    let s = m.step()?;
    assert_eq!((s.next, s.verdict), (WlcState::Idle, Verdict::Lost));
    assert_eq!(rig.sink.events().last(), Some(&Event::ListenerDetected(false)));
    assert!(!m.session().listener_present);
    Ok(())
}
