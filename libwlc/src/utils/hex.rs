// libwlc-rs/libwlc/src/utils/hex.rs
//! Hex rendering of NDEF messages and register payloads for logs.

use std::fmt::Write;

/// `&[0x57, 0x4c]` -> `"574c"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            // writing to a String cannot fail
            let _ = write!(s, "{:02x}", b);
            s
        })
}

/// `&[0xd0, 0x00, 0x00]` -> `"d0 00 00"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
