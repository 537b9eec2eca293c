// libwlc-rs/libwlc/src/protocol/capability.rs

use crate::constants::{
    DEFAULT_NDEF_READ_WAIT_MS, DEFAULT_WRITE_TIMEOUT_EXPONENT, MAX_NDEF_WRITE_WAIT,
    MAX_TIME_EXPONENT, MIN_CAP_WAIT_MS, WLC_VERSION, WLCCAP_MIN_PAYLOAD_LEN, WLCCAP_TYPE,
};
use crate::protocol::parser::{self, bits, pow2_ms};
use crate::protocol::record::NdefRecord;
use crate::types::ModeRequest;
use crate::{Error, Result};

/// Decoded WLC_CAP record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WlcCapability {
    /// Mode the listener asks for
    pub mode_request: ModeRequest,
    /// N_WT_MAX: negotiation wait cycles the listener may request
    pub max_nego_wait_cycles: u8,
    /// The listener may ask the poller to wait before negotiating
    pub negotiated_wait_enabled: bool,
    /// Each WLCCTL read must be acknowledged
    pub read_confirmation_required: bool,
    /// T_CAP_WT
    pub cap_wait_time_ms: u64,
    /// T_NDEF_RD_WT
    pub ndef_read_wait_ms: u64,
    /// T_NDEF_WR_TO
    pub ndef_write_timeout_ms: u64,
    /// T_NDEF_WR_WT
    pub ndef_write_wait_ms: u64,
}

impl WlcCapability {
    /// Layout: version(1) + mode byte(1) + cap_wt(1) + ndef_rd_wt(1)
    /// + ndef_wr_to(1) + ndef_wr_wt(1)
    pub fn parse(record: &NdefRecord) -> Result<Self> {
        super::expect_record_type(record, WLCCAP_TYPE)?;
        let p = &record.payload;
        parser::ensure_len(p, WLCCAP_MIN_PAYLOAD_LEN)?;

        let version = parser::byte_at(p, 0)?;
        if version != WLC_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let mode = parser::byte_at(p, 1)?;
        let mode_request = ModeRequest::try_from(bits(mode, 6, 2))?;

        let cap_exp = bits(parser::byte_at(p, 2)?, 0, 5).min(MAX_TIME_EXPONENT);
        let cap_wait_time_ms = pow2_ms(cap_exp, 3).max(MIN_CAP_WAIT_MS);

        let rd = parser::byte_at(p, 3)?;
        let ndef_read_wait_ms = match rd {
            0x00 | 0xFF => DEFAULT_NDEF_READ_WAIT_MS,
            v => u64::from(v) * 10,
        };

        let wr_exp = match parser::byte_at(p, 4)? {
            e @ 1..=4 => e,
            _ => DEFAULT_WRITE_TIMEOUT_EXPONENT,
        };

        let ndef_write_wait_ms = u64::from(parser::byte_at(p, 5)?.min(MAX_NDEF_WRITE_WAIT));

        Ok(Self {
            mode_request,
            max_nego_wait_cycles: bits(mode, 2, 4),
            negotiated_wait_enabled: bits(mode, 1, 1) == 1,
            read_confirmation_required: bits(mode, 0, 1) == 1,
            cap_wait_time_ms,
            ndef_read_wait_ms,
            ndef_write_timeout_ms: pow2_ms(wr_exp, 5),
            ndef_write_wait_ms,
        })
    }
}
