use super::checksum::checksum;
use super::error::TelegramError;
use super::layout;
use super::parser::Telegram;

/// Fixed-layout header bytes for a telegram, as written on the wire.
pub fn header_bytes(telegram: &Telegram) -> [u8; layout::HEADER_LEN] {
    let mut header = [0u8; layout::HEADER_LEN];
    header[layout::DEST_NODE_OFFSET] = telegram.dest_node;
    header[layout::SRC_NODE_OFFSET] = telegram.src_node;
    header[layout::START_MARKER_OFFSET] = layout::START_MARKER;
    header[layout::TELEGRAM_TYPE_OFFSET] = telegram.telegram_type;
    header[layout::DEST_SRC_OFFSET] = telegram.dest_src;
    header[layout::SRC_SRC_OFFSET] = telegram.src_src;
    header[layout::SPARE_OFFSET] = layout::SPARE;
    header[layout::PAYLOAD_TYPE_OFFSET] = telegram.payload_type;
    header[layout::PAYLOAD_SIZE_OFFSET] = telegram.payload_size;
    header[layout::PAYLOAD_VERSION_OFFSET] = telegram.payload_version;
    header
}

/// Serialize a telegram into a transport-ready buffer.
///
/// The trailing checksum is always recomputed; the `checksum` field of the
/// input is not consulted.
///
/// # Errors
/// Returns `PayloadTooLong` when the payload does not fit the one byte size
/// field and `PayloadSizeMismatch` when `payload_size` disagrees with the
/// payload.
///
/// # Examples
/// ```
/// use masterlink_core::{Telegram, parse_telegram, serialize_telegram};
///
/// let telegram = Telegram::new(0x14, 0x04, 0x04, vec![0x01, 0x01, 0x01])
///     .addressed(0xC0, 0x00, 0xC2, 0x00);
/// let bytes = serialize_telegram(&telegram)?;
/// assert_eq!(parse_telegram(&bytes)?, telegram);
/// # Ok::<(), masterlink_core::TelegramError>(())
/// ```
pub fn serialize_telegram(telegram: &Telegram) -> Result<Vec<u8>, TelegramError> {
    let length = telegram.payload.len();
    if length > layout::MAX_PAYLOAD_LEN {
        return Err(TelegramError::PayloadTooLong { length });
    }
    let declared = telegram.payload_size as usize;
    if declared != length {
        return Err(TelegramError::PayloadSizeMismatch {
            declared,
            actual: length,
        });
    }

    let mut buf = Vec::with_capacity(layout::MIN_LEN + length);
    buf.extend_from_slice(&header_bytes(telegram));
    buf.extend_from_slice(&telegram.payload);
    buf.push(checksum(&buf));
    Ok(buf)
}
