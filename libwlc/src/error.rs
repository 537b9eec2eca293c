// libwlc-rs/libwlc/src/error.rs

use thiserror::Error;

/// Broad classification of [`Error`], reported alongside step failures in
/// the watchdog log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed, absent or out-of-range NDEF content.
    Parse,
    /// A register transaction on the RF front end failed.
    Hardware,
    /// The session was driven without the records a state needs.
    Protocol,
    /// Tag link or session lifecycle problem.
    Link,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// A buffer or payload is shorter than its format requires.
    #[error("invalid length: expected at least {expected}, got {actual}")]
    InvalidLength {
        /// Minimum length
        expected: usize,
        /// Length found
        actual: usize,
    },

    #[error("empty NDEF message")]
    EmptyMessage,

    /// Malformed NDEF framing.
    #[error("NDEF format error: {0}")]
    RecordFormat(String),

    #[error("unexpected record type: expected {expected}, got {actual}")]
    UnexpectedRecordType {
        /// Record type the state needs
        expected: String,
        /// Record type read from the tag
        actual: String,
    },

    /// WLCCAP carries a version other than 1.0.
    #[error("unsupported WLC version: {0:#04x}")]
    UnsupportedVersion(u8),

    #[error("reserved mode request")]
    ReservedModeRequest,

    /// A test command sent to the RF front end failed.
    #[error("rf transaction {group:#04x}/{opcode:#04x} failed: {reason}")]
    Hardware {
        /// Test-command group
        group: u8,
        /// Test-command opcode
        opcode: u8,
        /// Failure reported by the front end
        reason: String,
    },

    /// Reading or writing the tag failed.
    #[error("tag link error: {0}")]
    TagLink(String),

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidLength { .. }
            | Error::EmptyMessage
            | Error::RecordFormat(_)
            | Error::UnexpectedRecordType { .. }
            | Error::UnsupportedVersion(_)
            | Error::ReservedModeRequest => ErrorCategory::Parse,
            Error::Hardware { .. } => ErrorCategory::Hardware,
            Error::ProtocolViolation(_) => ErrorCategory::Protocol,
            Error::TagLink(_) | Error::Io(_) => ErrorCategory::Link,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
