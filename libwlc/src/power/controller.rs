// libwlc-rs/libwlc/src/power/controller.rs

use std::sync::Arc;

use log::{debug, warn};

use super::model::{self, Calibration, Plan};
use super::state::PowerState;
use crate::rf::config;
use crate::rf::RfRegisters;
use crate::transport::ChargingEventSink;
use crate::types::VoltageKind;

/// Closed-loop power control of the transmitter.
///
/// Owns the session's `PowerState`. A failed register transaction is
/// logged and the field it would have changed keeps its previous value.
pub struct PowerAdjustmentController {
    regs: RfRegisters,
    events: Arc<dyn ChargingEventSink + Send + Sync>,
    state: PowerState,
    calibration: Calibration,
    /// Tier last driven on the GPIO lines; `None` until the first write
    applied_tier: Option<u8>,
}

impl PowerAdjustmentController {
    /// Controller with default power state and unity calibration.
    pub fn new(regs: RfRegisters, events: Arc<dyn ChargingEventSink + Send + Sync>) -> Self {
        Self {
            regs,
            events,
            state: PowerState::default(),
            calibration: Calibration::default(),
            applied_tier: None,
        }
    }

    /// Use `calibration` instead of unity.
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Current power trims
    pub fn state(&self) -> &PowerState {
        &self.state
    }

    /// Calibration applied to adjust requests
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Register access used by the controller
    pub fn registers(&self) -> &RfRegisters {
        &self.regs
    }

    /// Read the persisted calibration byte. Zero or a failed read keeps
    /// the current factor.
    pub fn load_calibration(&mut self) -> Calibration {
        match self.regs.read_calibration_percent() {
            Ok(Some(percent)) => {
                debug!("power-adjust calibration {}%", percent);
                self.calibration = Calibration::from_percent(percent);
            }
            Ok(None) => {}
            Err(e) => warn!("calibration read failed: {}", e),
        }
        self.calibration
    }

    /// Write the LDO setting; on failure the state keeps the old value.
    pub fn set_ldo(&mut self, ldo: u8) {
        match self.regs.write_ldo(ldo) {
            Ok(()) => self.state.set_ldo_setting(i32::from(ldo)),
            Err(e) => warn!("LDO write {} failed: {}", ldo, e),
        }
    }

    fn set_rfo(&mut self, rfo: u8) {
        match self.regs.write_rfo(rfo) {
            Ok(()) => self.state.set_rfo_setting(rfo),
            Err(e) => warn!("RFO write {} failed: {}", rfo, e),
        }
    }

    /// Select a DCDC tier. The battery voltage is sampled first and the
    /// DCDC is never set below it; selecting the tier already driven is
    /// skipped.
    pub fn set_dcdc_level(&mut self, tier: u8) {
        let Some(&tier_mv) = config::DCDC_TIER_MV.get(usize::from(tier)) else {
            warn!("invalid DCDC tier {}", tier);
            return;
        };

        let mut tier = tier;
        match self.regs.measure_mv(config::MEASURE_VBAT) {
            Ok(vbat) => {
                self.events.on_voltage_sample(VoltageKind::Battery, vbat);
                if vbat > tier_mv {
                    tier = match vbat {
                        v if v < 4200 => 2,
                        v if v < 4700 => 1,
                        v if v < 5200 => 0,
                        _ => tier,
                    };
                    debug!("DCDC below Vbat {} mV, forcing tier {}", vbat, tier);
                } else if self.applied_tier == Some(tier) {
                    return;
                }
            }
            Err(e) => {
                warn!("Vbat measurement failed: {}", e);
                if self.applied_tier == Some(tier) {
                    return;
                }
            }
        }

        match self.regs.select_dcdc_tier(tier) {
            Ok(()) => {
                self.applied_tier = Some(tier);
                self.state.set_dcdc_level(tier);
                self.events
                    .on_voltage_sample(VoltageKind::VddTx, config::DCDC_TIER_MV[usize::from(tier)]);
            }
            Err(e) => warn!("DCDC tier {} select failed: {}", tier, e),
        }
    }

    /// Static-mode register sequence: RX divider in high impedance, VDD_RF
    /// sampled, LDO at the initial charging level.
    pub fn apply_static_setup(&mut self) {
        if let Err(e) = self.regs.write_rx_divider_hz() {
            warn!("RX divider write failed: {}", e);
        }
        match self.regs.measure_mv(config::MEASURE_VDD_RF) {
            Ok(mv) => self.events.on_voltage_sample(VoltageKind::VddRf, mv),
            Err(e) => warn!("VDD_RF measurement failed: {}", e),
        }
        self.set_ldo(config::LDO_INIT_CHARGING);
        let ptx = model::ptx_for_settings(self.state.ldo_setting(), self.state.rfo_setting());
        self.state.set_ptx_percent(i64::from(ptx));
    }

    /// Negotiated-mode register sequence; Ptx restarts from the nominal
    /// level of the initial charging supply.
    pub fn apply_negotiated_setup(&mut self) {
        if let Err(e) = self.regs.write_rx_divider_hz() {
            warn!("RX divider write failed: {}", e);
        }
        self.set_rfo(config::RFO_DEFAULT);
        self.set_ldo(config::LDO_INIT_CHARGING);
        let ptx = model::ptx_for_settings(config::LDO_INIT_CHARGING, config::RFO_DEFAULT);
        self.state.set_ptx_percent(i64::from(ptx));
        debug!("negotiated setup, Ptx {}%", ptx);
    }

    /// Apply a WLCCTL power-adjust request and return the plan that was
    /// computed.
    pub fn apply(&mut self, request: i8) -> Plan {
        let rfo_now = match self.regs.read_rfo() {
            Ok(v) => {
                self.state.set_rfo_setting(v);
                v
            }
            Err(e) => {
                warn!("RFO read failed: {}", e);
                self.state.rfo_setting()
            }
        };

        let adj = match model::plan(&self.state, rfo_now, request, self.calibration) {
            Plan::AtLimit => {
                debug!("power adjust {} at limit", request);
                return Plan::AtLimit;
            }
            Plan::Adjust(adj) => adj,
        };
        debug!(
            "power adjust {}: Istep {:.2}% I1 {:.2}% Vrf {} -> {} mV",
            request, adj.current_step, adj.residual_step, adj.supply_mv, adj.projected_mv
        );

        if adj.dcdc_first {
            if let Some(tier) = adj.dcdc_tier {
                self.set_dcdc_level(tier);
            }
        }
        if adj.ldo_setting != self.state.ldo_setting() {
            self.set_ldo(adj.ldo_setting);
        }
        if !adj.dcdc_first {
            if let Some(tier) = adj.dcdc_tier {
                self.set_dcdc_level(tier);
            }
        }
        if adj.rfo_refused {
            debug!("RFO update refused, keeping {}", rfo_now);
        } else if adj.rfo_setting != rfo_now {
            self.set_rfo(adj.rfo_setting);
        }

        // Ptx follows what actually reached the registers.
        let ptx = model::ptx_for_settings(self.state.ldo_setting(), self.state.rfo_setting());
        self.state.set_ptx_percent(i64::from(ptx));
        debug!("power level {}%", ptx);
        Plan::Adjust(adj)
    }

    /// Back to the regular NFC levels: LDO 4.2 V, lowest driver impedance.
    pub fn reset_defaults(&mut self) {
        self.set_ldo(config::LDO_DEFAULT);
        self.set_rfo(config::RFO_DEFAULT);
    }
}
