// libwlc-rs/libwlc/src/protocol/record.rs

use crate::protocol::parser;
use crate::{Error, Result};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// Type Name Format of an NDEF record
#[repr(u8)]
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tnf {
    Empty = 0,
    WellKnown = 1,
    Media = 2,
    AbsoluteUri = 3,
    External = 4,
    Unknown = 5,
    Unchanged = 6,
    Reserved = 7,
}

impl Tnf {
    fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0 => Self::Empty,
            1 => Self::WellKnown,
            2 => Self::Media,
            3 => Self::AbsoluteUri,
            4 => Self::External,
            5 => Self::Unknown,
            6 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }
}

/// A single NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    /// Type name format
    pub tnf: Tnf,
    /// Record type, e.g. `WLCCAP`
    pub record_type: Vec<u8>,
    /// Optional record id
    pub id: Vec<u8>,
    /// Record payload
    pub payload: Vec<u8>,
}

impl NdefRecord {
    /// Well-known record without id
    pub fn well_known(record_type: &[u8], payload: &[u8]) -> Self {
        Self {
            tnf: Tnf::WellKnown,
            record_type: record_type.to_vec(),
            id: Vec::new(),
            payload: payload.to_vec(),
        }
    }

    /// The TNF_EMPTY record used as a read confirmation.
    pub fn empty() -> Self {
        Self {
            tnf: Tnf::Empty,
            record_type: Vec::new(),
            id: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Human readable record type for logs and errors.
    pub fn type_name(&self) -> String {
        if self.record_type.iter().all(|b| b.is_ascii_graphic()) {
            String::from_utf8_lossy(&self.record_type).into_owned()
        } else {
            crate::utils::bytes_to_hex(&self.record_type)
        }
    }

    fn encode_into(&self, out: &mut Vec<u8>, first: bool, last: bool) -> Result<()> {
        if self.record_type.len() > usize::from(u8::MAX) || self.id.len() > usize::from(u8::MAX)
        {
            return Err(Error::RecordFormat("type or id longer than 255 bytes".into()));
        }
        let payload_len = u32::try_from(self.payload.len())
            .map_err(|_| Error::RecordFormat("payload too large".into()))?;

        let short = payload_len <= u32::from(u8::MAX);
        let mut header = self.tnf as u8;
        if first {
            header |= FLAG_MB;
        }
        if last {
            header |= FLAG_ME;
        }
        if short {
            header |= FLAG_SR;
        }
        if !self.id.is_empty() {
            header |= FLAG_IL;
        }

        out.push(header);
        out.push(self.record_type.len() as u8);
        if short {
            out.push(payload_len as u8);
        } else {
            out.extend_from_slice(&payload_len.to_be_bytes());
        }
        if !self.id.is_empty() {
            out.push(self.id.len() as u8);
        }
        out.extend_from_slice(&self.record_type);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.payload);
        Ok(())
    }
}

/// NDEF message helper. Encodes/decodes the record sequence stored on
/// the listener's tag.
pub struct NdefMessage;

impl NdefMessage {
    /// Encode records as one message; MB/ME/SR/IL flags are derived.
    pub fn encode(records: &[NdefRecord]) -> Result<Vec<u8>> {
        if records.is_empty() {
            return Err(Error::EmptyMessage);
        }
        let mut out = Vec::new();
        let last = records.len() - 1;
        for (i, r) in records.iter().enumerate() {
            r.encode_into(&mut out, i == 0, i == last)?;
        }
        Ok(out)
    }

    /// Decode a message into its records. Chunked records are rejected.
    pub fn decode(data: &[u8]) -> Result<Vec<NdefRecord>> {
        if data.is_empty() {
            return Err(Error::EmptyMessage);
        }

        let mut records = Vec::new();
        let mut pos = 0usize;
        loop {
            let header = parser::byte_at(data, pos)?;
            if records.is_empty() && header & FLAG_MB == 0 {
                return Err(Error::RecordFormat("first record without MB flag".into()));
            }
            if header & FLAG_CF != 0 {
                return Err(Error::RecordFormat("chunked records are not supported".into()));
            }

            let type_len = usize::from(parser::byte_at(data, pos + 1)?);
            pos += 2;
            let payload_len = if header & FLAG_SR != 0 {
                let l = usize::from(parser::byte_at(data, pos)?);
                pos += 1;
                l
            } else {
                let l = parser::be_u32_at(data, pos)? as usize;
                pos += 4;
                l
            };
            let id_len = if header & FLAG_IL != 0 {
                let l = usize::from(parser::byte_at(data, pos)?);
                pos += 1;
                l
            } else {
                0
            };

            let record_type = parser::slice_at(data, pos, type_len)?.to_vec();
            pos += type_len;
            let id = parser::slice_at(data, pos, id_len)?.to_vec();
            pos += id_len;
            let payload = parser::slice_at(data, pos, payload_len)?.to_vec();
            pos += payload_len;

            records.push(NdefRecord {
                tnf: Tnf::from_bits(header),
                record_type,
                id,
                payload,
            });

            if header & FLAG_ME != 0 || pos >= data.len() {
                break;
            }
        }
        Ok(records)
    }
}
