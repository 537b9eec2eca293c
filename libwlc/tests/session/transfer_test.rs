// transfer_test.rs — power transfer, adjustment and presence handling

#[path = "../common/mod.rs"]
mod common;

use anyhow::Result;
use common::fixtures;
use libwlc::test_support::MockRig;
use libwlc::transport::mock::{Event, HostCall};
use libwlc::{Verdict, WlcConfig, WlcState, WlcStateMachine};

fn run_to_transfer(rig: &MockRig, control: Vec<u8>) -> Result<WlcStateMachine> {
    let mut m = rig.machine(WlcConfig::default());
    rig.tag.push_read(fixtures::negotiated_capability());
    rig.tag.push_read(control);
    for _ in 0..4 {
        m.step()?;
    }
    assert_eq!(m.state(), WlcState::PowerTransfer);
    Ok(m)
}

#[test]
fn long_idle_request_starts_presence_check() -> Result<()> {
    common::helpers::init_logging();
    let rig = MockRig::new();
    // T_WPT = 2^(9+3) = 4096 ms
    let mut m = run_to_transfer(&rig, fixtures::idle_control(0, 9))?;

    let s = m.step()?;
    assert_eq!((s.next, s.timeout_ms), (WlcState::PresenceExtended, 4096));
    assert_eq!(rig.tag.presence_period_ms(), Some(200));
    assert_eq!(rig.rf.ldo(), 18);
    assert_eq!(rig.rf.rfo(), 255);

    let s = m.step()?;
    assert_eq!((s.next, s.verdict), (WlcState::Idle, Verdict::Lost));
    assert_eq!(rig.tag.presence_stops(), vec![false]);
    assert_eq!(rig.tag.presence_period_ms(), None);
    Ok(())
}

#[test]
fn short_idle_request_skips_presence_check() -> Result<()> {
    let rig = MockRig::new();
    let mut m = run_to_transfer(&rig, fixtures::idle_control(0, 5))?;
    let s = m.step()?;
    assert_eq!((s.next, s.timeout_ms), (WlcState::PresenceExtended, 256));
    assert_eq!(rig.tag.presence_period_ms(), None);
    Ok(())
}

#[test]
fn adjustment_brackets_fod() -> Result<()> {
    let rig = MockRig::new();
    let mut m = run_to_transfer(&rig, fixtures::transfer_control(1, -4))?;

    assert_eq!(m.step()?.next, WlcState::PowerAdjust);
    let s = m.step()?;
    assert_eq!((s.next, s.timeout_ms), (WlcState::PowerHold, 32));
    assert!(m.power().state().ptx_percent() < 85);
    assert!(rig.rf.ldo() < 23);

    let s = m.step()?;
    assert_eq!(s.next, WlcState::ControlRead);
    let fod: Vec<HostCall> = rig
        .host
        .calls()
        .into_iter()
        .filter(|c| matches!(c, HostCall::Fod(_)))
        .collect();
    assert_eq!(fod, vec![HostCall::Fod(true), HostCall::Fod(false)]);
    Ok(())
}

#[test]
fn info_request_loops_through_info_send() -> Result<()> {
    let rig = MockRig::new();
    // WPT requested with the info bit set
    let ctl = libwlc::test_support::control_message(&[0x01, 0x40 | (2 << 1) | 0x01, 0, 0, 0, 0]);
    let mut m = run_to_transfer(&rig, ctl)?;
    for _ in 0..2 {
        m.step()?;
    }
    assert_eq!(m.step()?.next, WlcState::InfoSend);
    m.step()?;
    assert_eq!(rig.tag.written().len(), 2);
    Ok(())
}

#[test]
fn battery_level_and_voltage_events() -> Result<()> {
    let rig = MockRig::new();
    // level reported, counter 1, 64 %
    let ctl = libwlc::test_support::control_message(&[0x09, 0x40, 0x02, 64, 0, 0]);
    let mut m = run_to_transfer(&rig, ctl)?;
    m.step()?;
    m.step()?;

    let events = rig.sink.events();
    assert!(events.contains(&Event::BatteryLevel(64)));
    assert!(events.contains(&Event::Established(85)));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::VoltageSample(libwlc::VoltageKind::Battery, _)))
    );
    Ok(())
}
