// libwlc-rs/libwlc/src/protocol/info.rs

use crate::constants::{MAX_PTX_PERCENT, WLCINF_PAYLOAD_LEN, WLCINF_TYPE};
use crate::protocol::record::NdefRecord;

/// WLC_INFO record written by the poller before each control read.
/// Only Ptx is populated by this poller; the remaining fields are
/// reserved and sent as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WlcInfo {
    /// Transmit power relative to the maximum
    pub ptx_percent: u8,
    /// Reserved fields, sent as zero
    pub power_class: u8,
    #[allow(missing_docs)]
    pub tps: u8,
    #[allow(missing_docs)]
    pub cps: u8,
    #[allow(missing_docs)]
    pub nmsi: u8,
    #[allow(missing_docs)]
    pub nmsd: u8,
}

impl WlcInfo {
    /// Info record carrying `ptx_percent`, capped at 100
    pub fn with_ptx(ptx_percent: u8) -> Self {
        Self {
            ptx_percent: ptx_percent.min(MAX_PTX_PERCENT),
            ..Self::default()
        }
    }

    /// Record payload bytes
    pub fn payload(&self) -> [u8; WLCINF_PAYLOAD_LEN] {
        [
            self.ptx_percent,
            self.power_class,
            self.tps,
            self.cps,
            self.nmsi,
            self.nmsd,
        ]
    }

    /// Well-known WLCINF record
    pub fn to_record(&self) -> NdefRecord {
        NdefRecord::well_known(WLCINF_TYPE, &self.payload())
    }
}
