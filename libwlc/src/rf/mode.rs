// libwlc-rs/libwlc/src/rf/mode.rs

use log::{debug, warn};

use super::config;
use crate::power::PowerAdjustmentController;
use crate::transport::HostPollingControl;

/// Switch the front end to wireless charging: discovery paused, other
/// technologies muted, antenna damped, DCDC at the initial charging tier.
pub fn enter_charging_mode(host: &dyn HostPollingControl, power: &mut PowerAdjustmentController) {
    switch_mode(host, power, true);
}

/// Back to regular NFC operation: default DCDC tier and LDO, polling
/// resumed.
pub fn leave_charging_mode(host: &dyn HostPollingControl, power: &mut PowerAdjustmentController) {
    switch_mode(host, power, false);
}

fn switch_mode(host: &dyn HostPollingControl, power: &mut PowerAdjustmentController, on: bool) {
    debug!("charging mode {}", if on { "on" } else { "off" });
    host.disable_discovery();
    host.set_other_techs_muted(on);

    let damping = if on {
        config::DAMP_CHARGING
    } else {
        config::DAMP_NORMAL
    };
    if let Err(e) = power.registers().set_antenna_damping(damping) {
        warn!("antenna damping write failed: {}", e);
    }

    if on {
        power.set_dcdc_level(config::DCDC_TIER_INIT_CHARGING);
    } else {
        power.set_dcdc_level(config::DCDC_TIER_DEFAULT);
        power.set_ldo(config::LDO_DEFAULT);
    }
    host.restart_polling();
}
