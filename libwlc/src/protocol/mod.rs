// libwlc-rs/libwlc/src/protocol/mod.rs

/// WLCCAP record
pub mod capability;
/// Message-level encode and decode
pub mod codec;
/// WLCCTL record
pub mod control;
/// WLCINF record
pub mod info;
/// Bounds-checked byte readers
pub mod parser;
/// NDEF record framing
pub mod record;

pub use capability::WlcCapability;
pub use control::WlcControl;
pub use info::WlcInfo;
pub use record::{NdefMessage, NdefRecord, Tnf};

use crate::{Error, Result};

/// Ensure a record is a well-known record of the given WLC type.
pub(crate) fn expect_record_type(record: &NdefRecord, expected: &[u8]) -> Result<()> {
    if record.tnf != Tnf::WellKnown || record.record_type != expected {
        return Err(Error::UnexpectedRecordType {
            expected: String::from_utf8_lossy(expected).into_owned(),
            actual: record.type_name(),
        });
    }
    Ok(())
}
