// libwlc-rs/libwlc/src/session/machine.rs

use std::sync::Arc;

use log::{debug, info, warn};

use super::session::WlcSession;
use super::state::WlcState;
use crate::config::WlcConfig;
use crate::power::PowerAdjustmentController;
use crate::protocol::{codec, WlcCapability, WlcControl, WlcInfo};
use crate::transport::{ChargingEventSink, HostPollingControl, LinkLostNotifier, TagChannel};
use crate::types::{FodReason, ModeRequest};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// What the owning watchdog should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Keep running
    Continue,
    /// The listener is gone; end the session
    Lost,
    /// The listener's battery is full; end the session
    Full,
}

/// Result of one state-machine step: the next state and how long to wait
/// before running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// State to run next
    pub next: WlcState,
    /// Wait before the next state runs
    pub timeout_ms: u64,
    /// Whether the session continues
    pub verdict: Verdict,
}

impl Step {
    fn go(next: WlcState, timeout_ms: u64) -> Self {
        Self {
            next,
            timeout_ms,
            verdict: Verdict::Continue,
        }
    }

    fn end(next: WlcState, timeout_ms: u64, verdict: Verdict) -> Self {
        Self {
            next,
            timeout_ms,
            verdict,
        }
    }
}

/// Poller side of the WLC protocol for one listener.
///
/// The machine is driven synchronously: every call to [`step`] runs the
/// current state's action (tag I/O, register writes, event emission) and
/// returns the next state together with its wait time.
///
/// [`step`]: WlcStateMachine::step
pub struct WlcStateMachine {
    tag: Box<dyn TagChannel + Send>,
    host: Arc<dyn HostPollingControl + Send + Sync>,
    events: Arc<dyn ChargingEventSink + Send + Sync>,
    power: PowerAdjustmentController,
    config: WlcConfig,
    session: WlcSession,
    capability: Option<WlcCapability>,
    control: Option<WlcControl>,
    link_lost: Option<LinkLostNotifier>,
}

impl WlcStateMachine {
    /// Machine in `Idle` for a freshly discovered listener.
    pub fn new(
        tag: Box<dyn TagChannel + Send>,
        host: Arc<dyn HostPollingControl + Send + Sync>,
        events: Arc<dyn ChargingEventSink + Send + Sync>,
        power: PowerAdjustmentController,
        config: WlcConfig,
    ) -> Self {
        Self {
            tag,
            host,
            events,
            power,
            config,
            session: WlcSession::new(),
            capability: None,
            control: None,
            link_lost: None,
        }
    }

    /// Callback handed to the tag link when it runs its own presence
    /// check during long power-transfer-free periods.
    pub fn set_link_lost_notifier(&mut self, notifier: LinkLostNotifier) {
        self.link_lost = Some(notifier);
    }

    /// State the next step will run
    pub fn state(&self) -> WlcState {
        self.session.state
    }

    /// Session bookkeeping
    pub fn session(&self) -> &WlcSession {
        &self.session
    }

    /// Last WLCCAP read
    pub fn capability(&self) -> Option<&WlcCapability> {
        self.capability.as_ref()
    }

    /// Last WLCCTL read
    pub fn control(&self) -> Option<&WlcControl> {
        self.control.as_ref()
    }

    /// Power controller of the session
    pub fn power(&self) -> &PowerAdjustmentController {
        &self.power
    }

    /// Mutable power controller, used on teardown
    pub fn power_mut(&mut self) -> &mut PowerAdjustmentController {
        &mut self.power
    }

    /// Host polling control
    pub fn host(&self) -> &Arc<dyn HostPollingControl + Send + Sync> {
        &self.host
    }

    /// Event sink
    pub fn events(&self) -> &Arc<dyn ChargingEventSink + Send + Sync> {
        &self.events
    }

    /// Tag link, used on teardown
    pub fn tag_mut(&mut self) -> &mut (dyn TagChannel + Send) {
        &mut *self.tag
    }

    /// FOD interrupt: the next step runs the FOD state. A pending FOD
    /// state is only ever replaced by a removal.
    pub fn on_fod(&mut self, reason: FodReason) {
        let next = match reason {
            FodReason::StopPattern => WlcState::FodStopPattern,
            FodReason::DetectionOrRemoval | FodReason::Error => WlcState::FodRemoval,
        };
        if self.session.state.is_fod() && next != WlcState::FodRemoval {
            debug!("FOD {} ignored, {} pending", reason, self.session.state);
            return;
        }
        debug!("FOD {} in {}, next {}", reason, self.session.state, next);
        self.session.state = next;
    }

    /// Run the current state and move to the next one.
    ///
    /// Listener loss, a stuck WLCCTL counter and exhausted negotiation
    /// waits are reported through [`Verdict::Lost`]. An `Err` means the
    /// machine was driven into a state it has no data for.
    pub fn step(&mut self) -> Result<Step> {
        let current = self.session.state;
        let step = match current {
            WlcState::Idle => self.idle(),
            WlcState::StaticSetup => self.static_setup(),
            WlcState::NegotiationSetup => self.negotiation_setup()?,
            WlcState::InfoSend => self.info_send()?,
            WlcState::ControlRead => self.control_read()?,
            WlcState::ReadConfirm => self.read_confirm()?,
            WlcState::PowerTransfer => self.power_transfer()?,
            WlcState::PowerAdjust => self.power_adjust()?,
            WlcState::PowerHold => self.power_hold()?,
            WlcState::PresenceExtended => self.presence_extended(),
            WlcState::FodStopPattern => Step::go(WlcState::PowerHold, 0),
            WlcState::FodRemoval => {
                self.session.charging_active = false;
                Step::end(WlcState::Idle, 0, Verdict::Lost)
            }
        };
        debug!(
            "{} -> {} ({} ms, {:?})",
            current, step.next, step.timeout_ms, step.verdict
        );
        self.session.state = step.next;
        Ok(step)
    }

    fn current_capability(&self) -> Result<&WlcCapability> {
        self.capability
            .as_ref()
            .ok_or_else(|| Error::ProtocolViolation("no capability read yet".into()))
    }

    fn current_control(&self) -> Result<&WlcControl> {
        self.control
            .as_ref()
            .ok_or_else(|| Error::ProtocolViolation("no control read yet".into()))
    }

    fn listener_lost(&mut self, reason: &Error) -> Step {
        debug!("listener lost: {}", reason);
        self.session.listener_present = false;
        self.events.on_listener_detected(false);
        Step::end(WlcState::Idle, self.config.step_delay_ms, Verdict::Lost)
    }

    fn idle(&mut self) -> Step {
        let cap = match self
            .tag
            .read_ndef()
            .and_then(|msg| codec::parse_capability(&msg))
        {
            Ok(cap) => cap,
            Err(e) => return self.listener_lost(&e),
        };

        self.session.listener_present = true;
        self.events.on_listener_detected(true);
        let wait = cap.cap_wait_time_ms;
        let mode = cap.mode_request;
        self.capability = Some(cap);

        if mode == ModeRequest::BatteryFull {
            info!("listener battery full");
            self.events.on_battery_full();
            self.events.on_complete();
            self.session.charging_active = false;
            Step::end(WlcState::PresenceExtended, wait, Verdict::Full)
        } else if mode == ModeRequest::Static || self.host.is_multi_tag() {
            Step::go(WlcState::StaticSetup, 0)
        } else {
            Step::go(WlcState::NegotiationSetup, self.config.setup_delay_ms)
        }
    }

    fn static_setup(&mut self) -> Step {
        if self.session.first_pass {
            self.power.apply_static_setup();
            self.session.first_pass = false;
            self.session.charging_active = true;
            self.events.on_established(self.power.state().ptx_percent());
        }
        let wait = self
            .capability
            .as_ref()
            .map_or(self.config.step_delay_ms, |c| c.cap_wait_time_ms);
        Step::go(WlcState::Idle, wait)
    }

    fn negotiation_setup(&mut self) -> Result<Step> {
        if self.session.first_pass {
            self.power.apply_negotiated_setup();
            self.session.first_pass = false;
        }

        let cap = self.current_capability()?;
        if !cap.negotiated_wait_enabled {
            return Ok(Step::go(WlcState::InfoSend, self.config.setup_delay_ms));
        }

        let (max, wait) = (cap.max_nego_wait_cycles, cap.cap_wait_time_ms);
        if self.session.retry.negotiation >= max {
            warn!("negotiation wait exhausted after {} cycles", max);
            self.session.listener_present = false;
            return Ok(Step::end(
                WlcState::Idle,
                self.config.step_delay_ms,
                Verdict::Lost,
            ));
        }
        self.session.retry.negotiation += 1;
        Ok(Step::go(WlcState::Idle, wait))
    }

    fn info_send(&mut self) -> Result<Step> {
        let info = WlcInfo::with_ptx(self.power.state().ptx_percent());
        let message = codec::encode_info_message(&info)?;
        debug!("WLCINF -> {}", bytes_to_hex_spaced(&message));
        // a lost listener shows up on the next control read
        if let Err(e) = self.tag.write_ndef(&message) {
            warn!("WLCINF write failed: {}", e);
        }
        let wait = self.current_capability()?.ndef_read_wait_ms;
        Ok(Step::go(WlcState::ControlRead, wait))
    }

    fn control_read(&mut self) -> Result<Step> {
        let ctl = match self
            .tag
            .read_ndef()
            .and_then(|msg| codec::parse_control(&msg))
        {
            Ok(ctl) => ctl,
            Err(e) => return Ok(self.listener_lost(&e)),
        };

        self.session.charging_active = true;
        self.events.on_established(self.power.state().ptx_percent());
        if let Some(level) = ctl.battery_level_percent {
            self.events.on_battery_level(level);
        }

        let counter = ctl.sequence_counter;
        match self.session.sequence_counter_seen {
            Some(seen) if seen == counter => {
                if self.session.retry.read_confirm < self.config.max_duplicate_retries {
                    self.session.retry.read_confirm += 1;
                    debug!(
                        "WLCCTL counter {} repeated, retry {}",
                        counter, self.session.retry.read_confirm
                    );
                    self.control = Some(ctl);
                    return Ok(Step::go(
                        WlcState::ControlRead,
                        self.config.duplicate_retry_backoff_ms,
                    ));
                }
                warn!(
                    "WLCCTL counter stuck at {} after {} retries",
                    counter, self.session.retry.read_confirm
                );
                self.session.retry.read_confirm = 0;
                self.session.charging_active = false;
                return Ok(Step::end(WlcState::Idle, 0, Verdict::Lost));
            }
            Some(seen) if seen.next() != counter => {
                warn!("WLCCTL counter jumped from {} to {}", seen, counter);
            }
            _ => {}
        }
        self.session.sequence_counter_seen = Some(counter);
        self.session.retry.read_confirm = 0;
        self.control = Some(ctl);

        let cap = self.current_capability()?;
        if cap.read_confirmation_required {
            Ok(Step::go(WlcState::ReadConfirm, cap.ndef_write_wait_ms))
        } else {
            Ok(Step::go(WlcState::PowerTransfer, self.config.step_delay_ms))
        }
    }

    fn read_confirm(&mut self) -> Result<Step> {
        if let Err(e) = self.tag.write_ndef(&codec::encode_ack_message()?) {
            warn!("read confirmation write failed: {}", e);
        }
        Ok(Step::go(WlcState::PowerTransfer, self.config.step_delay_ms))
    }

    fn power_transfer(&mut self) -> Result<Step> {
        let ctl = self.current_control()?;
        if ctl.wpt_requested {
            return Ok(Step::go(WlcState::PowerAdjust, self.config.step_delay_ms));
        }

        let duration = ctl.wpt_duration_ms;
        debug!("no power transfer requested");
        self.power.reset_defaults();
        if duration > self.config.extended_presence_threshold_ms {
            let notifier = self
                .link_lost
                .clone()
                .unwrap_or_else(|| Arc::new(|| {}));
            if let Err(e) = self
                .tag
                .start_presence_checking(self.config.extended_presence_period_ms, notifier)
            {
                warn!("presence check start failed: {}", e);
            }
        }
        Ok(Step::go(WlcState::PresenceExtended, duration))
    }

    fn power_adjust(&mut self) -> Result<Step> {
        let ctl = self.current_control()?;
        let (request, duration) = (ctl.power_adjust_request, ctl.wpt_duration_ms);
        if request != 0 || !self.power.state().ptx_at_max() {
            self.power.apply(request);
        }
        self.host.start_stop_fod(true);
        Ok(Step::go(WlcState::PowerHold, duration))
    }

    fn power_hold(&mut self) -> Result<Step> {
        self.host.start_stop_fod(false);
        // a stop pattern can arrive before the first WLCCTL
        let info_requested = self
            .control
            .as_ref()
            .is_some_and(|c| c.wpt_info_requested);
        if info_requested {
            Ok(Step::go(WlcState::InfoSend, self.config.step_delay_ms))
        } else {
            Ok(Step::go(WlcState::ControlRead, 0))
        }
    }

    fn presence_extended(&mut self) -> Step {
        if let Err(e) = self.tag.stop_presence_checking(false) {
            warn!("presence check stop failed: {}", e);
        }
        self.session.charging_active = false;
        Step::end(WlcState::Idle, self.config.step_delay_ms, Verdict::Lost)
    }
}
