use thiserror::Error;

/// Errors returned by telegram parsing, verification and serialization.
///
/// # Examples
/// ```
/// use masterlink_core::TelegramError;
///
/// let err = TelegramError::ChecksumMismatch { expected: 0x12, actual: 0x13 };
/// assert!(err.to_string().contains("checksum mismatch"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelegramError {
    #[error("telegram too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unexpected framing byte at offset {offset}: expected 0x{expected:02X}, got 0x{actual:02X}")]
    InvalidFraming {
        offset: usize,
        expected: u8,
        actual: u8,
    },
    #[error("checksum mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },
    #[error("payload size mismatch: declared {declared}, payload has {actual} bytes")]
    PayloadSizeMismatch { declared: usize, actual: usize },
    #[error("payload too long: {length} bytes (max 255)")]
    PayloadTooLong { length: usize },
}
