// libwlc-rs/libwlc/src/power/state.rs

use crate::constants::MAX_PTX_PERCENT;
use crate::rf::config::{DCDC_TIER_DEFAULT, RFO_DEFAULT};

/// LDO setting range, 2.4 V to 5.1 V in 0.1 V steps
pub const LDO_MIN: u8 = 0;
#[allow(missing_docs)]
pub const LDO_MAX: u8 = 27;
/// Highest DCDC tier index
pub const DCDC_LEVEL_MAX: u8 = 3;
/// Driver resistance register range, 2 Ω to 0.502 Ω
pub const RFO_MIN: u8 = 64;
#[allow(missing_docs)]
pub const RFO_MAX: u8 = 255;

/// Hardware power trims of the running session. Every setter clamps to
/// the register's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerState {
    ldo_setting: u8,
    dcdc_level: u8,
    rfo_setting: u8,
    ptx_percent: u8,
}

impl Default for PowerState {
    fn default() -> Self {
        Self {
            ldo_setting: LDO_MIN,
            dcdc_level: DCDC_TIER_DEFAULT,
            rfo_setting: RFO_DEFAULT,
            ptx_percent: MAX_PTX_PERCENT,
        }
    }
}

impl PowerState {
    /// LDO register value
    pub fn ldo_setting(&self) -> u8 {
        self.ldo_setting
    }

    /// DCDC tier, 0 is the highest output
    pub fn dcdc_level(&self) -> u8 {
        self.dcdc_level
    }

    /// Driver resistance register value
    pub fn rfo_setting(&self) -> u8 {
        self.rfo_setting
    }

    /// Ptx reported in WLCINF
    pub fn ptx_percent(&self) -> u8 {
        self.ptx_percent
    }

    /// LDO output in millivolts: 2.4 V + 0.1 V per step
    pub fn ldo_millivolts(&self) -> u32 {
        2400 + 100 * u32::from(self.ldo_setting)
    }

    /// Set the LDO, clamped to its range
    pub fn set_ldo_setting(&mut self, v: i32) {
        self.ldo_setting = v.clamp(i32::from(LDO_MIN), i32::from(LDO_MAX)) as u8;
    }

    /// Set the DCDC tier, clamped to its range
    pub fn set_dcdc_level(&mut self, v: u8) {
        self.dcdc_level = v.min(DCDC_LEVEL_MAX);
    }

    /// Set the driver resistance, clamped to its range
    pub fn set_rfo_setting(&mut self, v: u8) {
        self.rfo_setting = v.max(RFO_MIN);
    }

    /// Set Ptx, clamped to `0..=100`
    pub fn set_ptx_percent(&mut self, v: i64) {
        self.ptx_percent = v.clamp(0, i64::from(MAX_PTX_PERCENT)) as u8;
    }

    /// Whether Ptx is at 100 %
    pub fn ptx_at_max(&self) -> bool {
        self.ptx_percent == MAX_PTX_PERCENT
    }
}
