// record_test.rs — NDEF message framing as seen on listener tags

use libwlc::protocol::{NdefMessage, NdefRecord, Tnf};
use libwlc::utils::bytes_to_hex_spaced;
use libwlc::Error;

#[test]
fn wlc_records_use_short_well_known_layout() {
    let bytes = NdefMessage::encode(&[NdefRecord::well_known(b"WLCCTL", &[0; 6])]).unwrap();
    assert_eq!(bytes_to_hex_spaced(&bytes[..9]), "d1 06 06 57 4c 43 43 54 4c");
}

#[test]
fn three_record_message_flags() {
    let recs = vec![
        NdefRecord::well_known(b"WLCCAP", &[0x10, 0, 0, 0, 0, 0]),
        NdefRecord::well_known(b"U", b"\x04example.com"),
        NdefRecord::well_known(b"T", b"\x02enok"),
    ];
    let bytes = NdefMessage::encode(&recs).unwrap();
    // MB on the first header only
    assert_eq!(bytes[0] & 0xC0, 0x80);
    let decoded = NdefMessage::decode(&bytes).unwrap();
    assert_eq!(decoded, recs);
}

#[test]
fn unknown_tnf_survives_decoding() {
    let rec = NdefRecord {
        tnf: Tnf::Media,
        record_type: b"text/plain".to_vec(),
        id: Vec::new(),
        payload: b"hi".to_vec(),
    };
    let bytes = NdefMessage::encode(&[rec.clone()]).unwrap();
    assert_eq!(NdefMessage::decode(&bytes).unwrap(), vec![rec]);
}

#[test]
fn encode_rejects_empty_and_oversized() {
    assert!(matches!(NdefMessage::encode(&[]), Err(Error::EmptyMessage)));
    let rec = NdefRecord::well_known(&[b'x'; 256], &[]);
    assert!(matches!(
        NdefMessage::encode(&[rec]),
        Err(Error::RecordFormat(_))
    ));
}
