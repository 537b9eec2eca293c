// libwlc-rs/libwlc/src/rf/registers.rs

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use super::config;
use crate::protocol::parser;
use crate::transport::RfFrontEnd;
use crate::utils::bytes_to_hex_spaced;
use crate::Result;

/// RF front end shared between the charging session and the host. Each
/// transaction holds the lock for its whole duration.
pub type SharedRfFrontEnd = Arc<Mutex<Box<dyn RfFrontEnd + Send>>>;

/// Wrap an RF front end so it can be shared.
pub fn shared<R: RfFrontEnd + Send + 'static>(rf: R) -> SharedRfFrontEnd {
    Arc::new(Mutex::new(Box::new(rf)))
}

/// Typed register operations on top of the raw test-command primitive.
#[derive(Clone)]
pub struct RfRegisters {
    rf: SharedRfFrontEnd,
}

impl RfRegisters {
    /// Register access over a shared front end
    pub fn new(rf: SharedRfFrontEnd) -> Self {
        Self { rf }
    }

    fn transact(&self, group: u8, opcode: u8, payload: &[u8]) -> Result<Vec<u8>> {
        debug!(
            "rf {:02x}/{:02x} <- {}",
            group,
            opcode,
            bytes_to_hex_spaced(payload)
        );
        let resp = self.rf.lock().send_test_command(group, opcode, payload)?;
        debug!("rf {:02x}/{:02x} -> {}", group, opcode, bytes_to_hex_spaced(&resp));
        Ok(resp)
    }

    /// Read a 32-bit register.
    pub fn read_register(&self, addr: u32) -> Result<u32> {
        let resp = self.transact(config::GROUP_RF, config::OP_REG_READ, &addr.to_be_bytes())?;
        let v = parser::slice_at(&resp, 0, 4)?;
        Ok(u32::from_be_bytes([v[0], v[1], v[2], v[3]]))
    }

    /// Masked write: address(4) + mask(4) + value(4), all big-endian.
    pub fn write_masked(&self, addr: u32, mask: u32, value: u32) -> Result<()> {
        let mut payload = Vec::with_capacity(12);
        payload.extend_from_slice(&addr.to_be_bytes());
        payload.extend_from_slice(&mask.to_be_bytes());
        payload.extend_from_slice(&(value & mask).to_be_bytes());
        self.transact(config::GROUP_RF, config::OP_REG_WRITE_MASKED, &payload)?;
        Ok(())
    }

    /// Current driver resistance setting
    pub fn read_rfo(&self) -> Result<u8> {
        let reg = self.read_register(config::REG_TX_DRIVER_RESISTANCE)?;
        Ok(((reg & config::RFO_MASK) >> config::RFO_SHIFT) as u8)
    }

    /// Write the driver resistance setting.
    pub fn write_rfo(&self, rfo: u8) -> Result<()> {
        self.write_masked(
            config::REG_TX_DRIVER_RESISTANCE,
            config::RFO_MASK,
            u32::from(rfo) << config::RFO_SHIFT,
        )
    }

    /// Write the LDO setting.
    pub fn write_ldo(&self, ldo: u8) -> Result<()> {
        self.write_masked(
            config::REG_VDD_TX_RF,
            config::LDO_MASK,
            u32::from(ldo) << config::LDO_SHIFT,
        )
    }

    /// Put the RX divider in high impedance to cut dissipation while
    /// transmitting power.
    pub fn write_rx_divider_hz(&self) -> Result<()> {
        self.write_masked(config::REG_RXDIV_DAMP_CTRL, config::RXDIV_DAMP_MASK, 0)
    }

    /// Switch the antenna damping.
    pub fn set_antenna_damping(&self, value: u8) -> Result<()> {
        self.write_masked(
            config::REG_DAMP_CTRL1,
            config::DAMP_CTRL1_MASK,
            u32::from(value) << config::DAMP_CTRL1_SHIFT,
        )
    }

    /// Sample a supply rail, in millivolts.
    pub fn measure_mv(&self, channel: u8) -> Result<u32> {
        let resp = self.transact(
            config::GROUP_RF,
            config::OP_GET_MEASUREMENT,
            &[0x00, channel],
        )?;
        Ok(u32::from(parser::be_u16_at(&resp, 0)?))
    }

    /// Persisted power-adjust calibration in percent; `None` when unset.
    pub fn read_calibration_percent(&self) -> Result<Option<u8>> {
        let resp = self.transact(
            config::GROUP_RF,
            config::OP_GET_PERSIST_DATA,
            &config::PERSIST_PA_FACTOR,
        )?;
        Ok(resp.first().copied().filter(|&b| b != 0))
    }

    /// Configure the GPIO_RF pins; as outputs they are driven high first.
    pub fn configure_rf_gpio(&self, output: bool) -> Result<()> {
        let direction = if output {
            self.gpio_set_output(config::GPIO_RF_PINS)?;
            config::GPIO_RF_PINS
        } else {
            0
        };
        self.transact(
            config::GROUP_GPIO,
            config::OP_GPIO_CONFIGURE,
            &gpio_payload(direction),
        )?;
        Ok(())
    }

    /// Drive the DCDC tier select lines.
    pub fn select_dcdc_tier(&self, tier: u8) -> Result<()> {
        self.gpio_set_output((tier << config::GPIO_DCDC_SHIFT) & config::GPIO_RF_PINS)
    }

    fn gpio_set_output(&self, value: u8) -> Result<()> {
        self.transact(
            config::GROUP_GPIO,
            config::OP_GPIO_SET_OUTPUT,
            &gpio_payload(value),
        )?;
        Ok(())
    }
}

fn gpio_payload(value: u8) -> [u8; 8] {
    [0x00, 0x00, config::GPIO_RF_PINS, 0x00, 0x00, 0x00, value, 0x00]
}
