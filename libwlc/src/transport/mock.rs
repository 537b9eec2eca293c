// libwlc-rs/libwlc/src/transport/mock.rs

//! In-memory collaborators for tests. Every mock is a cheap handle onto
//! shared state: clone it, hand one clone to the code under test and keep
//! the other to seed inputs and inspect what happened.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::protocol::parser;
use crate::rf::config;
use crate::transport::traits::{
    ChargingEventSink, HostPollingControl, LinkLostNotifier, RfFrontEnd, TagChannel,
};
use crate::types::VoltageKind;
use crate::{Error, Result};

#[derive(Default)]
struct TagState {
    reads: VecDeque<Vec<u8>>,
    written: Vec<Vec<u8>>,
    fail_writes: bool,
    presence_period_ms: Option<u64>,
    presence_stops: Vec<bool>,
    on_lost: Option<LinkLostNotifier>,
    disconnects: usize,
}

/// Mock tag link. Reads pop queued NDEF messages; an empty queue reads as
/// a lost link.
#[derive(Clone, Default)]
pub struct MockTag {
    inner: Arc<Mutex<TagState>>,
}

impl MockTag {
    /// Empty tag with the listener present
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the next `read_ndef`.
    pub fn push_read(&self, message: Vec<u8>) {
        self.inner.lock().reads.push_back(message);
    }

    /// Messages not yet read
    pub fn reads_remaining(&self) -> usize {
        self.inner.lock().reads.len()
    }

    /// Messages written so far
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.inner.lock().written.clone()
    }

    /// Make every following write fail.
    pub fn set_write_failure(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }

    /// Period of the running presence check, if any
    pub fn presence_period_ms(&self) -> Option<u64> {
        self.inner.lock().presence_period_ms
    }

    /// `immediate` flag of every stop request, in order
    pub fn presence_stops(&self) -> Vec<bool> {
        self.inner.lock().presence_stops.clone()
    }

    /// Times the link was dropped
    pub fn disconnect_count(&self) -> usize {
        self.inner.lock().disconnects
    }

    /// Fire the link-lost callback registered by the presence check.
    pub fn trigger_link_lost(&self) -> bool {
        let cb = self.inner.lock().on_lost.clone();
        match cb {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

impl TagChannel for MockTag {
    fn read_ndef(&mut self) -> Result<Vec<u8>> {
        self.inner
            .lock()
            .reads
            .pop_front()
            .ok_or_else(|| Error::TagLink("no NDEF content".into()))
    }

    fn write_ndef(&mut self, message: &[u8]) -> Result<()> {
        let mut st = self.inner.lock();
        if st.fail_writes {
            return Err(Error::TagLink("write rejected".into()));
        }
        st.written.push(message.to_vec());
        Ok(())
    }

    fn start_presence_checking(
        &mut self,
        period_ms: u64,
        on_lost: LinkLostNotifier,
    ) -> Result<()> {
        let mut st = self.inner.lock();
        st.presence_period_ms = Some(period_ms);
        st.on_lost = Some(on_lost);
        Ok(())
    }

    fn stop_presence_checking(&mut self, immediate: bool) -> Result<()> {
        let mut st = self.inner.lock();
        st.presence_stops.push(immediate);
        st.presence_period_ms = None;
        st.on_lost = None;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.inner.lock().disconnects += 1;
        Ok(())
    }
}

struct RfState {
    commands: Vec<(u8, u8, Vec<u8>)>,
    registers: HashMap<u32, u32>,
    measurements: HashMap<u8, u32>,
    calibration: u8,
    gpio_output: Option<u8>,
    gpio_direction: Option<u8>,
    failing: HashSet<u8>,
}

impl Default for RfState {
    fn default() -> Self {
        let registers = HashMap::from([
            (
                config::REG_TX_DRIVER_RESISTANCE,
                u32::from(config::RFO_DEFAULT) << config::RFO_SHIFT,
            ),
            (
                config::REG_VDD_TX_RF,
                u32::from(config::LDO_DEFAULT) << config::LDO_SHIFT,
            ),
        ]);
        let measurements = HashMap::from([
            (config::MEASURE_VBAT, 3800),
            (config::MEASURE_VDD_TX, 4200),
            (config::MEASURE_VDD_RF, 4200),
        ]);
        Self {
            commands: Vec::new(),
            registers,
            measurements,
            calibration: 0,
            gpio_output: None,
            gpio_direction: None,
            failing: HashSet::new(),
        }
    }
}

/// Mock NFC controller implementing the register test commands on an
/// in-memory register file.
#[derive(Clone, Default)]
pub struct MockRf {
    inner: Arc<Mutex<RfState>>,
}

impl MockRf {
    /// Register file with default LDO and RFO
    pub fn new() -> Self {
        Self::default()
    }

    /// Test commands sent so far as `(group, opcode, payload)`
    pub fn commands(&self) -> Vec<(u8, u8, Vec<u8>)> {
        self.inner.lock().commands.clone()
    }

    /// Forget the recorded commands.
    pub fn clear_commands(&self) {
        self.inner.lock().commands.clear();
    }

    /// Raw register value
    pub fn register(&self, addr: u32) -> u32 {
        self.inner.lock().registers.get(&addr).copied().unwrap_or(0)
    }

    /// LDO field of the LDO register
    pub fn ldo(&self) -> u8 {
        ((self.register(config::REG_VDD_TX_RF) & config::LDO_MASK) >> config::LDO_SHIFT) as u8
    }

    /// RFO field of the RFO register
    pub fn rfo(&self) -> u8 {
        ((self.register(config::REG_TX_DRIVER_RESISTANCE) & config::RFO_MASK) >> config::RFO_SHIFT)
            as u8
    }

    /// Antenna damping field
    pub fn damping(&self) -> u8 {
        ((self.register(config::REG_DAMP_CTRL1) & config::DAMP_CTRL1_MASK)
            >> config::DAMP_CTRL1_SHIFT) as u8
    }

    /// Tier currently driven on the DCDC select lines
    pub fn dcdc_tier(&self) -> Option<u8> {
        self.inner
            .lock()
            .gpio_output
            .map(|v| (v & config::GPIO_RF_PINS) >> config::GPIO_DCDC_SHIFT)
    }

    /// Configured DCDC GPIO direction, if any
    pub fn gpio_direction(&self) -> Option<u8> {
        self.inner.lock().gpio_direction
    }

    /// Value returned for a measurement channel.
    pub fn set_measurement(&self, channel: u8, millivolts: u32) {
        self.inner.lock().measurements.insert(channel, millivolts);
    }

    /// Persisted calibration percentage.
    pub fn set_calibration(&self, percent: u8) {
        self.inner.lock().calibration = percent;
    }

    /// Make every later command with this opcode fail.
    pub fn fail_opcode(&self, opcode: u8) {
        self.inner.lock().failing.insert(opcode);
    }

    /// Stop injecting failures.
    pub fn clear_failures(&self) {
        self.inner.lock().failing.clear();
    }
}

impl RfFrontEnd for MockRf {
    fn send_test_command(&mut self, group: u8, opcode: u8, payload: &[u8]) -> Result<Vec<u8>> {
        let mut st = self.inner.lock();
        st.commands.push((group, opcode, payload.to_vec()));
        if st.failing.contains(&opcode) {
            return Err(Error::Hardware {
                group,
                opcode,
                reason: "mock failure".into(),
            });
        }

        match (group, opcode) {
            (config::GROUP_RF, config::OP_REG_READ) => {
                let addr = parser::be_u32_at(payload, 0)?;
                let v = st.registers.get(&addr).copied().unwrap_or(0);
                Ok(v.to_be_bytes().to_vec())
            }
            (config::GROUP_RF, config::OP_REG_WRITE_MASKED) => {
                let addr = parser::be_u32_at(payload, 0)?;
                let mask = parser::be_u32_at(payload, 4)?;
                let value = parser::be_u32_at(payload, 8)?;
                let reg = st.registers.entry(addr).or_insert(0);
                *reg = (*reg & !mask) | (value & mask);
                Ok(vec![0x00])
            }
            (config::GROUP_RF, config::OP_GET_MEASUREMENT) => {
                let ch = parser::byte_at(payload, 1)?;
                let mv = st.measurements.get(&ch).copied().unwrap_or(0);
                Ok((mv as u16).to_be_bytes().to_vec())
            }
            (config::GROUP_RF, config::OP_GET_PERSIST_DATA) => Ok(vec![st.calibration, 0, 0, 0]),
            (config::GROUP_GPIO, config::OP_GPIO_SET_OUTPUT) => {
                st.gpio_output = Some(parser::byte_at(payload, 6)?);
                Ok(vec![0x00])
            }
            (config::GROUP_GPIO, config::OP_GPIO_CONFIGURE) => {
                st.gpio_direction = Some(parser::byte_at(payload, 6)?);
                Ok(vec![0x00])
            }
            _ => Ok(Vec::new()),
        }
    }
}

/// Everything a [`RecordingSink`] can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `on_listener_detected`
    ListenerDetected(bool),
    /// `on_established` with Ptx
    Established(u8),
    /// `on_battery_full`
    BatteryFull,
    /// `on_battery_level`
    BatteryLevel(u8),
    /// `on_complete`
    Complete,
    /// `on_voltage_sample`
    VoltageSample(VoltageKind, u32),
    /// `on_stopped`
    Stopped,
}

/// Event sink that keeps every notification in order.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingSink {
    /// Empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// How often `event` was recorded
    pub fn count(&self, event: &Event) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl ChargingEventSink for RecordingSink {
    fn on_listener_detected(&self, present: bool) {
        self.push(Event::ListenerDetected(present));
    }

    fn on_established(&self, power_level: u8) {
        self.push(Event::Established(power_level));
    }

    fn on_battery_full(&self) {
        self.push(Event::BatteryFull);
    }

    fn on_battery_level(&self, percent: u8) {
        self.push(Event::BatteryLevel(percent));
    }

    fn on_complete(&self) {
        self.push(Event::Complete);
    }

    fn on_voltage_sample(&self, kind: VoltageKind, millivolts: u32) {
        self.push(Event::VoltageSample(kind, millivolts));
    }

    fn on_stopped(&self) {
        self.push(Event::Stopped);
    }
}

/// Calls observed by a [`MockHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    /// `disable_discovery`
    DisableDiscovery,
    /// `restart_polling`
    RestartPolling,
    /// `start_stop_fod`
    Fod(bool),
    /// `mute_other_techs`
    MuteOtherTechs(bool),
}

/// Host double recording its polling-control calls.
#[derive(Clone, Default)]
pub struct MockHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
    multi_tag: Arc<Mutex<bool>>,
}

impl MockHost {
    /// Host in single-tag mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Report whether more than one tag is in the field.
    pub fn set_multi_tag(&self, multi: bool) {
        *self.multi_tag.lock() = multi;
    }
}

impl HostPollingControl for MockHost {
    fn disable_discovery(&self) {
        self.calls.lock().push(HostCall::DisableDiscovery);
    }

    fn restart_polling(&self) {
        self.calls.lock().push(HostCall::RestartPolling);
    }

    fn start_stop_fod(&self, enable: bool) {
        self.calls.lock().push(HostCall::Fod(enable));
    }

    fn is_multi_tag(&self) -> bool {
        *self.multi_tag.lock()
    }

    fn set_other_techs_muted(&self, muted: bool) {
        self.calls.lock().push(HostCall::MuteOtherTechs(muted));
    }
}
