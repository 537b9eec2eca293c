// lifecycle_test.rs — watchdog thread start, signals and teardown

#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use common::{fixtures, helpers};
use libwlc::test_support::{capability_message, MockRig};
use libwlc::transport::mock::{Event, HostCall};
use libwlc::watchdog::{self, ExitReason};
use libwlc::{FodReason, WlcConfig};

const PARKED: Duration = Duration::from_secs(30);

fn fast_config() -> WlcConfig {
    WlcConfig::default()
        .with_initial_delay_ms(0)
        .with_duplicate_retries(3, 5)
}

#[test]
fn end_twice_is_idempotent() -> anyhow::Result<()> {
    helpers::init_logging();
    let rig = MockRig::new();
    let handle = watchdog::spawn(rig.machine(WlcConfig::default()), PARKED)?;
    assert!(handle.is_running());

    handle.end(false);
    assert_eq!(handle.join(), Some(ExitReason::Stopped));
    handle.end(false);
    handle.end(true);
    assert_eq!(handle.join(), None);
    assert!(!handle.is_running());

    assert_eq!(rig.sink.count(&Event::Stopped), 1);
    assert_eq!(rig.tag.disconnect_count(), 1);
    assert_eq!(rig.tag.presence_stops(), vec![false]);
    Ok(())
}

#[test]
fn stop_with_disable_callback() -> anyhow::Result<()> {
    let rig = MockRig::new();
    let handle = watchdog::spawn(rig.machine(WlcConfig::default()), PARKED)?;
    handle.end(true);
    assert_eq!(handle.join(), Some(ExitReason::Stopped));
    assert_eq!(rig.tag.presence_stops(), vec![true]);
    Ok(())
}

#[test]
fn teardown_restores_regular_nfc() -> anyhow::Result<()> {
    let rig = MockRig::new();
    let handle = watchdog::spawn(rig.machine(fast_config()), Duration::ZERO)?;
    // empty tag: the first capability read loses the listener
    assert_eq!(handle.join(), Some(ExitReason::Lost));

    assert_eq!(rig.sink.count(&Event::Stopped), 0);
    assert_eq!(rig.rf.ldo(), 18);
    assert_eq!(rig.rf.rfo(), 255);
    assert_eq!(rig.host.calls().last(), Some(&HostCall::RestartPolling));
    assert!(rig.host.calls().contains(&HostCall::MuteOtherTechs(false)));
    assert_eq!(rig.tag.disconnect_count(), 1);
    Ok(())
}

#[test]
fn lost_signal_ends_session() -> anyhow::Result<()> {
    let rig = MockRig::new();
    let handle = watchdog::spawn(rig.machine(WlcConfig::default()), PARKED)?;
    handle.lost();
    assert_eq!(handle.join(), Some(ExitReason::Lost));
    // no step ran
    assert!(rig.sink.events().iter().all(|e| !matches!(e, Event::ListenerDetected(_))));
    Ok(())
}

#[test]
fn battery_full_run() -> anyhow::Result<()> {
    let rig = MockRig::new();
    rig.tag.push_read(fixtures::battery_full_capability());
    let handle = watchdog::spawn(rig.machine(fast_config()), Duration::ZERO)?;
    assert_eq!(handle.join(), Some(ExitReason::Full));
    assert_eq!(rig.sink.count(&Event::BatteryFull), 1);
    assert_eq!(rig.sink.count(&Event::Complete), 1);
    Ok(())
}

#[test]
fn fod_removal_ends_session() -> anyhow::Result<()> {
    let rig = MockRig::new();
    let handle = watchdog::spawn(rig.machine(WlcConfig::default()), PARKED)?;
    handle.notify_fod(FodReason::DetectionOrRemoval);
    assert_eq!(handle.join(), Some(ExitReason::Lost));
    Ok(())
}

#[test]
fn stuck_counter_loses_listener() -> anyhow::Result<()> {
    let rig = MockRig::new();
    // T_NDEF_RD_WT 10 ms
    rig.tag
        .push_read(capability_message(&[0x10, 0x40, 0x05, 0x01, 0x01, 0x00]));
    rig.tag.push_read(fixtures::transfer_control(3, 0));
    for _ in 0..4 {
        rig.tag.push_read(fixtures::idle_control(3, 2));
    }
    let handle = watchdog::spawn(rig.machine(fast_config()), Duration::ZERO)?;
    assert_eq!(handle.join(), Some(ExitReason::Lost));
    assert_eq!(rig.tag.reads_remaining(), 0);
    assert_eq!(rig.sink.count(&Event::Stopped), 0);
    assert_eq!(rig.rf.ldo(), 18);
    Ok(())
}

#[test]
fn failed_info_write_keeps_session_alive() -> anyhow::Result<()> {
    let rig = MockRig::new();
    rig.tag
        .push_read(capability_message(&[0x10, 0x40, 0x05, 0x01, 0x01, 0x00]));
    rig.tag.set_write_failure(true);
    let handle = watchdog::spawn(rig.machine(fast_config()), Duration::ZERO)?;
    // the write is skipped and the empty control read loses the listener
    assert_eq!(handle.join(), Some(ExitReason::Lost));
    assert!(rig.tag.written().is_empty());
    assert_eq!(rig.sink.events().last(), Some(&Event::ListenerDetected(false)));
    Ok(())
}

#[test]
fn stop_pattern_early_in_session() -> anyhow::Result<()> {
    let rig = MockRig::new();
    let handle = watchdog::spawn(rig.machine(WlcConfig::default()), PARKED)?;
    handle.notify_fod(FodReason::StopPattern);
    // FodStopPattern, PowerHold, then ControlRead finds nothing on the tag
    assert_eq!(handle.join(), Some(ExitReason::Lost));
    assert!(rig.host.calls().contains(&HostCall::Fod(false)));
    Ok(())
}

#[test]
fn link_lost_during_extended_presence() -> anyhow::Result<()> {
    let rig = MockRig::new();
    rig.tag
        .push_read(capability_message(&[0x10, 0x40, 0x05, 0x01, 0x01, 0x00]));
    rig.tag.push_read(fixtures::idle_control(0, 9));
    let handle = watchdog::spawn(rig.machine(fast_config()), Duration::ZERO)?;

    assert!(helpers::wait_until(Duration::from_secs(2), || {
        rig.tag.presence_period_ms() == Some(200)
    }));
    assert!(handle.is_running());
    assert!(rig.tag.trigger_link_lost());
    assert_eq!(handle.join(), Some(ExitReason::Lost));
    Ok(())
}

#[test]
fn dropped_handle_stops_session() -> anyhow::Result<()> {
    let rig = MockRig::new();
    let handle = watchdog::spawn(rig.machine(WlcConfig::default()), PARKED)?;
    drop(handle);
    assert!(helpers::wait_until(Duration::from_secs(2), || {
        rig.sink.count(&Event::Stopped) == 1
    }));
    Ok(())
}
