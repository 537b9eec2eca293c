//! RF front-end register map and test-command codes
#![allow(missing_docs)]

/// Test-command group for RF/analog registers
pub const GROUP_RF: u8 = 0x03;
/// Test-command group for GPIO control
pub const GROUP_GPIO: u8 = 0x02;

pub const OP_REG_READ: u8 = 0xB8;
pub const OP_REG_WRITE_MASKED: u8 = 0xB9;
pub const OP_GET_PERSIST_DATA: u8 = 0xC8;
pub const OP_GET_MEASUREMENT: u8 = 0xC9;
pub const OP_GPIO_CONFIGURE: u8 = 0x15;
pub const OP_GPIO_SET_OUTPUT: u8 = 0x16;

/// RXTX_CTRL_DAMP_CTRL1: antenna damping switch
pub const REG_DAMP_CTRL1: u32 = 0x4000_6D28;
pub const DAMP_CTRL1_MASK: u32 = 0x0003_0000;
pub const DAMP_CTRL1_SHIFT: u32 = 16;
pub const DAMP_CHARGING: u8 = 0x03;
pub const DAMP_NORMAL: u8 = 0x00;

/// RXTX_CTRL_RXDIV_DAMP_CTRL: RX divider set to high impedance
pub const REG_RXDIV_DAMP_CTRL: u32 = 0x4000_6D2C;
pub const RXDIV_DAMP_MASK: u32 = 0x000F_8000;

/// RXTX_CTRL_TX_DRIVER_RESISTANCE: RFO setting in bits 23-16
pub const REG_TX_DRIVER_RESISTANCE: u32 = 0x4000_6D30;
pub const RFO_MASK: u32 = 0x00FF_0000;
pub const RFO_SHIFT: u32 = 16;

/// RXTX_CTRL_VDD_TX_RF: LDO setting in bits 9-5
pub const REG_VDD_TX_RF: u32 = 0x4000_6D34;
pub const LDO_MASK: u32 = 0x0000_03E0;
pub const LDO_SHIFT: u32 = 5;

/// Measurement channels (big-endian millivolts in the reply)
pub const MEASURE_VBAT: u8 = 0x01;
pub const MEASURE_VDD_TX: u8 = 0x02;
pub const MEASURE_VDD_RF: u8 = 0x03;

/// Persisted-data selector holding the power-adjust calibration byte
pub const PERSIST_PA_FACTOR: [u8; 4] = [0x01, 0x00, 0x00, 0x01];

/// GPIO_RF pins driving the DCDC tier select
pub const GPIO_RF_PINS: u8 = 0x60;
pub const GPIO_DCDC_SHIFT: u8 = 5;

/// DCDC output per tier, millivolts
pub const DCDC_TIER_MV: [u32; 4] = [5200, 4700, 4200, 3700];
/// Tier used when entering charging mode
pub const DCDC_TIER_INIT_CHARGING: u8 = 1;
/// Tier used for regular NFC operation
pub const DCDC_TIER_DEFAULT: u8 = 2;

/// LDO for the initial charging supply: (4.7 V - 2.4 V) / 0.1 V
pub const LDO_INIT_CHARGING: u8 = 23;
/// LDO used for regular NFC operation: (4.2 V - 2.4 V) / 0.1 V
pub const LDO_DEFAULT: u8 = 18;
/// Default driver resistance register value
pub const RFO_DEFAULT: u8 = 0xFF;
