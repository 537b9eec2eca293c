// libwlc-rs/libwlc/src/protocol/codec.rs

use crate::Result;

use super::capability::WlcCapability;
use super::control::WlcControl;
use super::info::WlcInfo;
use super::record::{NdefMessage, NdefRecord};

fn first_record(message: &[u8]) -> Result<NdefRecord> {
    NdefMessage::decode(message)?
        .into_iter()
        .next()
        .ok_or(crate::Error::EmptyMessage)
}

/// Decode an NDEF message read from the tag and parse its first record
/// as WLC_CAP.
pub fn parse_capability(message: &[u8]) -> Result<WlcCapability> {
    WlcCapability::parse(&first_record(message)?)
}

/// Decode an NDEF message read from the tag and parse its first record
/// as WLC_CTL.
pub fn parse_control(message: &[u8]) -> Result<WlcControl> {
    WlcControl::parse(&first_record(message)?)
}

/// Encode a WLC_INFO message carrying the current Ptx.
pub fn encode_info_message(info: &WlcInfo) -> Result<Vec<u8>> {
    NdefMessage::encode(&[info.to_record()])
}

/// Encode the empty NDEF message used as read confirmation.
pub fn encode_ack_message() -> Result<Vec<u8>> {
    NdefMessage::encode(&[NdefRecord::empty()])
}
