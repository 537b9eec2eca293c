// libwlc-rs/libwlc/src/charging.rs

//! Entry point used by the host NFC stack.
//!
//! `NfcCharging` owns the shared collaborators and at most one running
//! watchdog. The host calls [`NfcCharging::on_tag_discovered`] with the
//! NDEF content of every new tag; a valid WLC_CAP record starts a
//! charging session on its own thread.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::config::WlcConfig;
use crate::power::{Calibration, PowerAdjustmentController};
use crate::protocol::codec;
use crate::rf::{self, config, RfRegisters, SharedRfFrontEnd};
use crate::session::WlcStateMachine;
use crate::transport::{ChargingEventSink, HostPollingControl, TagChannel};
use crate::types::FodReason;
use crate::watchdog::{self, WatchdogHandle};

/// Owner of the charging collaborators and of the running session.
pub struct NfcCharging {
    rf: SharedRfFrontEnd,
    host: Arc<dyn HostPollingControl + Send + Sync>,
    events: Arc<dyn ChargingEventSink + Send + Sync>,
    config: WlcConfig,
    calibration: Calibration,
    watchdog: Option<WatchdogHandle>,
}

impl NfcCharging {
    /// Manager over the given collaborators; no register is touched yet.
    pub fn new(
        rf: SharedRfFrontEnd,
        host: Arc<dyn HostPollingControl + Send + Sync>,
        events: Arc<dyn ChargingEventSink + Send + Sync>,
        config: WlcConfig,
    ) -> Self {
        let calibration = Calibration::from_percent(config.default_calibration_percent);
        Self {
            rf,
            host,
            events,
            config,
            calibration,
            watchdog: None,
        }
    }

    /// Loop configuration handed to every session
    pub fn config(&self) -> &WlcConfig {
        &self.config
    }

    /// Calibration used for new sessions
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    // each use gets its own controller, tier caches are never shared
    fn controller(&self) -> PowerAdjustmentController {
        PowerAdjustmentController::new(RfRegisters::new(self.rf.clone()), self.events.clone())
            .with_calibration(self.calibration)
    }

    /// One-time front-end setup: DCDC select pins as outputs, default
    /// tier, persisted calibration.
    pub fn initialize(&mut self) {
        let mut power = self.controller();
        if let Err(e) = power.registers().configure_rf_gpio(true) {
            warn!("RF GPIO setup failed: {}", e);
        }
        power.set_dcdc_level(config::DCDC_TIER_DEFAULT);
        self.calibration = power.load_calibration();
        info!("charging initialized, calibration {}%", self.calibration.percent());
    }

    /// Enter or leave charging mode on the front end.
    pub fn set_charging_mode(&self, on: bool) {
        let mut power = self.controller();
        if on {
            rf::enter_charging_mode(&*self.host, &mut power);
        } else {
            rf::leave_charging_mode(&*self.host, &mut power);
        }
    }

    /// Start a session for a newly discovered tag. Returns `true` when its
    /// NDEF content is a WLC capability and a watchdog was started; a tag
    /// seen while a session is running is ignored.
    pub fn on_tag_discovered(&mut self, tag: Box<dyn TagChannel + Send>, ndef: &[u8]) -> bool {
        if self.is_active() {
            debug!("charging session already running, ignoring tag");
            return false;
        }
        if let Err(e) = codec::parse_capability(ndef) {
            debug!("not a WLC listener: {}", e);
            return false;
        }
        if let Some(done) = self.watchdog.take() {
            done.join();
        }

        self.set_charging_mode(true);
        let machine = WlcStateMachine::new(
            tag,
            self.host.clone(),
            self.events.clone(),
            self.controller(),
            self.config.clone(),
        );
        match watchdog::spawn(machine, self.config.initial_delay()) {
            Ok(handle) => {
                info!("WLC listener detected, session started");
                self.watchdog = Some(handle);
                true
            }
            Err(e) => {
                error!("watchdog start failed: {}", e);
                self.set_charging_mode(false);
                false
            }
        }
    }

    /// Forward a FOD notification to the running session, if any.
    pub fn on_fod_detected(&self, reason: FodReason) {
        match &self.watchdog {
            Some(w) if w.is_running() => w.notify_fod(reason),
            _ => debug!("FOD {} without a session", reason),
        }
    }

    /// End the running session and wait for its teardown.
    pub fn stop(&mut self) {
        if let Some(w) = self.watchdog.take() {
            w.end(true);
            w.join();
        }
    }

    /// Whether a session is running
    pub fn is_active(&self) -> bool {
        self.watchdog.as_ref().is_some_and(|w| w.is_running())
    }

    /// Handle of the current or last session
    pub fn watchdog(&self) -> Option<&WatchdogHandle> {
        self.watchdog.as_ref()
    }
}

impl Drop for NfcCharging {
    fn drop(&mut self) {
        self.stop();
    }
}
