// libwlc-rs/libwlc/src/power/model.rs
//! Physical model of the transmitter and the pure part of the power
//! adjustment.
//!
//! The RF driver is modelled as a voltage source `Vrf` (the LDO output)
//! behind an output resistance `2 * RFO` in series with a 7 Ω load.
//! Transmit power is `P = (sqrt(2) * 2 * Vrf / (π * (2 * RFO + 7)))^2 * 7`.
//! The driver resistance register holds `128 / RFO`, so register 255 is
//! the lowest impedance (0.502 Ω) and register 64 the highest (2 Ω).
//!
//! Voltages are carried as integer millivolts so the tier comparisons
//! and LDO steps are exact; only the current/impedance ratios use `f64`.

use std::f64::consts::{PI, SQRT_2};

use super::state::{LDO_MAX, LDO_MIN, PowerState, RFO_MAX, RFO_MIN};
use crate::constants::MAX_PTX_PERCENT;

/// Antenna load resistance
pub const LOAD_OHMS: f64 = 7.0;
/// Register value per ohm of driver resistance: 2^7
pub const RFO_SCALE: f64 = 128.0;
/// Nominal driver resistance used for the maximum-power reference
pub const NOMINAL_RFO_OHMS: f64 = 0.502;

/// LDO output range
pub const VDD_RF_MIN_MV: u32 = 2400;
#[allow(missing_docs)]
pub const VDD_RF_MAX_MV: u32 = 5100;
/// Millivolts per LDO register step
pub const LDO_STEP_MV: u32 = 100;

/// Power-adjust calibration stored as a percentage (100 = 1.00).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration(u8);

impl Calibration {
    /// Factor 1.00
    pub const UNITY: Self = Self(100);

    /// Calibration from a percentage
    pub const fn from_percent(percent: u8) -> Self {
        Self(percent)
    }

    /// Calibration as a percentage
    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Requested power step in percent for a WLCCTL adjust request
    /// (5 % per unit, scaled by the calibration).
    pub fn power_step_percent(&self, request: i8) -> f64 {
        f64::from(i32::from(request) * 5 * i32::from(self.0)) / 100.0
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::UNITY
    }
}

/// Driver resistance in ohms for a register value.
pub fn rfo_ohms(setting: u8) -> f64 {
    RFO_SCALE / f64::from(setting.max(1))
}

/// Register value for a driver resistance, clipped to the register range.
pub fn rfo_register(ohms: f64) -> u8 {
    (RFO_SCALE / ohms)
        .round()
        .clamp(f64::from(RFO_MIN), f64::from(RFO_MAX)) as u8
}

/// Transmit power in milliwatts.
pub fn transmit_power_mw(vdd_rf_mv: u32, rfo: f64) -> f64 {
    let amplitude = SQRT_2 * 2.0 * f64::from(vdd_rf_mv) / (PI * (2.0 * rfo + LOAD_OHMS));
    amplitude * amplitude * LOAD_OHMS / 1000.0
}

/// Reference power for Ptx = 100 %
pub fn max_transmit_power_mw() -> f64 {
    transmit_power_mw(VDD_RF_MAX_MV, NOMINAL_RFO_OHMS)
}

/// Ptx as a rounded percentage of the maximum transmit power.
pub fn ptx_percent(vdd_rf_mv: u32, rfo: f64) -> u8 {
    let pct = (transmit_power_mw(vdd_rf_mv, rfo) * 100.0 / max_transmit_power_mw()).round();
    pct.clamp(0.0, f64::from(MAX_PTX_PERCENT)) as u8
}

/// Ptx for register settings. Full supply with the lowest driver
/// impedance saturates at 100 %.
pub fn ptx_for_settings(ldo_setting: u8, rfo_setting: u8) -> u8 {
    let vdd_rf_mv = VDD_RF_MIN_MV + LDO_STEP_MV * u32::from(ldo_setting);
    if vdd_rf_mv >= VDD_RF_MAX_MV && rfo_setting == RFO_MAX {
        return MAX_PTX_PERCENT;
    }
    ptx_percent(vdd_rf_mv.min(VDD_RF_MAX_MV), rfo_ohms(rfo_setting))
}

/// DCDC tier able to feed an LDO output of `vdd_rf_mv`.
pub fn dcdc_tier_for(vdd_rf_mv: u32) -> u8 {
    match vdd_rf_mv {
        v if v > 4600 => 0,
        v if v > 4100 => 1,
        v if v > 3600 => 2,
        _ => 3,
    }
}

/// Register values computed for one adjust request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentPlan {
    /// Requested current change, percent
    pub current_step: f64,
    /// Current change left after the RFO headroom, percent
    pub residual_step: f64,
    /// RF supply before the adjustment
    pub supply_mv: u32,
    /// RF supply after the LDO step
    pub projected_mv: u32,
    /// New LDO register value
    pub ldo_setting: u8,
    /// DCDC tier to select, if the supply moves
    pub dcdc_tier: Option<u8>,
    /// Raise the DCDC before touching the LDO (otherwise after)
    pub dcdc_first: bool,
    /// RFO register value to apply
    pub rfo_setting: u8,
    /// The computed RFO moved against the request and was dropped
    pub rfo_refused: bool,
    /// Ptx of the planned settings
    pub ptx_percent: u8,
}

/// Outcome of [`plan`].
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// LDO and RFO are both at the end stop in the requested direction
    AtLimit,
    /// New register settings to apply
    Adjust(AdjustmentPlan),
}

/// Compute the new LDO/DCDC/RFO settings for a power-adjust request.
///
/// `rfo_now` is the register value read back from the driver. The LDO
/// step never has the opposite sign of `request`, so a positive request
/// never lowers the RF supply.
pub fn plan(state: &PowerState, rfo_now: u8, request: i8, calibration: Calibration) -> Plan {
    let power_step = calibration.power_step_percent(request).max(-99.0);
    let current_step = ((1.0 + power_step / 100.0).sqrt() - 1.0) * 100.0;

    let rfo_now = rfo_now.max(RFO_MIN);
    let ldo = state.ldo_setting();
    if (rfo_now == RFO_MIN && ldo == LDO_MIN && power_step <= 0.0)
        || (rfo_now == RFO_MAX && ldo == LDO_MAX && power_step >= 0.0)
    {
        return Plan::AtLimit;
    }

    let rfo_0 = rfo_ohms(RFO_MAX);
    let rfo_hi = rfo_ohms(RFO_MIN);
    let rfo_i = rfo_ohms(rfo_now);
    let residual_step =
        current_step - 100.0 * (1.0 - (2.0 * rfo_0 + LOAD_OHMS) / (2.0 * rfo_i + LOAD_OHMS));

    let supply_mv = state.ldo_millivolts().min(VDD_RF_MAX_MV);
    let supply_v = f64::from(supply_mv) / 1000.0;
    let wanted = (residual_step * supply_v * 0.1).ceil();
    let mut ldo_step = if residual_step > 0.0 {
        let headroom = (f64::from(VDD_RF_MAX_MV - supply_mv) / f64::from(LDO_STEP_MV)).floor();
        if ldo == LDO_MAX { 0.0 } else { wanted.min(headroom) }
    } else {
        let floor =
            ((f64::from(VDD_RF_MIN_MV) - f64::from(supply_mv)) / f64::from(LDO_STEP_MV)).floor();
        if ldo == LDO_MIN { 0.0 } else { wanted.max(floor) }
    } as i32;
    ldo_step = match request.signum() {
        1 => ldo_step.max(0),
        -1 => ldo_step.min(0),
        _ => 0,
    };

    let ldo_setting = (i32::from(ldo) + ldo_step).clamp(i32::from(LDO_MIN), i32::from(LDO_MAX)) as u8;
    let projected_mv = VDD_RF_MIN_MV + LDO_STEP_MV * u32::from(ldo_setting);
    let dcdc_tier = (residual_step != 0.0).then(|| dcdc_tier_for(projected_mv));

    let remaining = residual_step
        - 100.0 * (f64::from(projected_mv) - f64::from(supply_mv)) / f64::from(supply_mv);
    let target_ohms = if remaining > 0.0 {
        let r = (2.0 * rfo_0 - LOAD_OHMS * remaining / 100.0) / (2.0 * (remaining / 100.0 + 1.0));
        r.max(rfo_0)
    } else if remaining == 0.0 {
        rfo_i
    } else if remaining <= -100.0 {
        rfo_hi
    } else {
        let r = (2.0 * rfo_0 - LOAD_OHMS * remaining / 100.0) / (2.0 * (remaining / 100.0 + 1.0));
        r.min(rfo_hi)
    };

    let computed = rfo_register(target_ohms);
    let rfo_refused = (computed > rfo_now && current_step <= 0.0)
        || (computed < rfo_now && current_step >= 0.0);
    let rfo_setting = if rfo_refused { rfo_now } else { computed };

    Plan::Adjust(AdjustmentPlan {
        current_step,
        residual_step,
        supply_mv,
        projected_mv,
        ldo_setting,
        dcdc_tier,
        dcdc_first: residual_step > 0.0,
        rfo_setting,
        rfo_refused,
        ptx_percent: ptx_for_settings(ldo_setting, rfo_setting),
    })
}
