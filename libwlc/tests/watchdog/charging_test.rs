// charging_test.rs — NfcCharging as driven by the host stack

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{fixtures, helpers};
use libwlc::rf::{config, shared};
use libwlc::test_support::MockRig;
use libwlc::transport::mock::{Event, HostCall};
use libwlc::{FodReason, NfcCharging, WlcConfig};

fn charging(rig: &MockRig, config: WlcConfig) -> NfcCharging {
    NfcCharging::new(
        shared(rig.rf.clone()),
        Arc::new(rig.host.clone()),
        Arc::new(rig.sink.clone()),
        config,
    )
}

fn parked() -> WlcConfig {
    WlcConfig::default().with_initial_delay_ms(30_000)
}

#[test]
fn initialize_loads_calibration() {
    helpers::init_logging();
    let rig = MockRig::new();
    rig.rf.set_calibration(120);
    let mut c = charging(&rig, WlcConfig::default());
    assert_eq!(c.calibration().percent(), 100);
    c.initialize();
    assert_eq!(c.calibration().percent(), 120);
    assert_eq!(rig.rf.dcdc_tier(), Some(config::DCDC_TIER_DEFAULT));
    assert!(rig.rf.gpio_direction().is_some());
}

#[test]
fn only_wlc_tags_start_a_session() {
    let rig = MockRig::new();
    let mut c = charging(&rig, parked());
    let other = libwlc::test_support::record_message(b"T", b"\x02enhello");
    assert!(!c.on_tag_discovered(Box::new(rig.tag.clone()), &other));
    assert!(!c.is_active());
    assert!(rig.host.calls().is_empty());
}

#[test]
fn one_session_at_a_time() {
    let rig = MockRig::new();
    let mut c = charging(&rig, parked());
    let cap = fixtures::negotiated_capability();

    assert!(c.on_tag_discovered(Box::new(rig.tag.clone()), &cap));
    assert!(c.is_active());
    assert_eq!(rig.rf.damping(), config::DAMP_CHARGING);
    assert_eq!(rig.rf.dcdc_tier(), Some(config::DCDC_TIER_INIT_CHARGING));

    assert!(!c.on_tag_discovered(Box::new(rig.tag.clone()), &cap));

    c.stop();
    assert!(!c.is_active());
    assert_eq!(rig.sink.count(&Event::Stopped), 1);
    assert_eq!(rig.rf.damping(), config::DAMP_NORMAL);
    assert_eq!(rig.rf.ldo(), config::LDO_DEFAULT);
    assert_eq!(rig.host.calls().last(), Some(&HostCall::RestartPolling));

    // a new tag after the first session ended starts again
    assert!(c.on_tag_discovered(Box::new(rig.tag.clone()), &cap));
    c.stop();
    assert_eq!(rig.sink.count(&Event::Stopped), 2);
}

#[test]
fn fod_reaches_running_session() {
    let rig = MockRig::new();
    let mut c = charging(&rig, parked());
    c.on_fod_detected(FodReason::Error);

    assert!(c.on_tag_discovered(Box::new(rig.tag.clone()), &fixtures::negotiated_capability()));
    c.on_fod_detected(FodReason::DetectionOrRemoval);
    assert!(helpers::wait_until(Duration::from_secs(2), || !c.is_active()));
    assert_eq!(rig.sink.count(&Event::Stopped), 0);
    assert_eq!(rig.tag.disconnect_count(), 1);
}

#[test]
fn drop_ends_session() {
    let rig = MockRig::new();
    {
        let mut c = charging(&rig, parked());
        assert!(c.on_tag_discovered(Box::new(rig.tag.clone()), &fixtures::static_capability()));
    }
    assert_eq!(rig.sink.count(&Event::Stopped), 1);
    assert_eq!(rig.tag.disconnect_count(), 1);
}
