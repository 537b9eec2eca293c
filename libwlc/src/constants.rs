// libwlc-rs/libwlc/src/constants.rs
//! Protocol constants from the NFC Forum WLC specification

/// WLC capability record type ("WLCCAP")
pub const WLCCAP_TYPE: &[u8] = b"WLCCAP";

/// WLC listener control record type ("WLCCTL")
pub const WLCCTL_TYPE: &[u8] = b"WLCCTL";

/// WLC poller information record type ("WLCINF"), a.k.a. WLCPI
pub const WLCINF_TYPE: &[u8] = b"WLCINF";

/// Only supported WLCCAP protocol version (major 1, minor 0)
pub const WLC_VERSION: u8 = 0x10;

/// Minimum payload length of WLCCAP and WLCCTL records
pub const WLCCAP_MIN_PAYLOAD_LEN: usize = 6;
#[allow(missing_docs)]
pub const WLCCTL_MIN_PAYLOAD_LEN: usize = 6;

/// WLCINF payload length
pub const WLCINF_PAYLOAD_LEN: usize = 6;

/// Largest time exponent accepted for T_CAP_WT and T_WPT
pub const MAX_TIME_EXPONENT: u8 = 0x13;

/// Floor of the capability wait time
pub const MIN_CAP_WAIT_MS: u64 = 250;

/// T_NDEF_RD_WT used when the listener leaves the field at 0x00 or 0xFF
pub const DEFAULT_NDEF_READ_WAIT_MS: u64 = 2540;

/// Write-timeout exponent used when the listener's value is out of range
pub const DEFAULT_WRITE_TIMEOUT_EXPONENT: u8 = 4;

/// Upper bound of T_NDEF_WR_WT
pub const MAX_NDEF_WRITE_WAIT: u8 = 0x0A;

/// Upper bound of the hold-off exponent
pub const MAX_HOLD_OFF_EXPONENT: u8 = 0x0F;

/// Accepted WLCCTL power-adjust bytes: `0x00..=0x14` and `0xF6..=0xFF`
pub const POWER_ADJUST_MAX_RAISE: u8 = 0x14;
#[allow(missing_docs)]
pub const POWER_ADJUST_MIN_LOWER: u8 = 0xF6;

/// Largest valid battery level
pub const MAX_BATTERY_LEVEL: u8 = 100;

/// Sequence counter modulus
pub const SEQUENCE_MODULO: u8 = 8;

/// Ptx percentage ceiling
pub const MAX_PTX_PERCENT: u8 = 100;
