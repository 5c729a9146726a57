use tracing::{debug, trace};

use super::checksum::checksum;
use super::error::TelegramError;
use super::layout;
use super::reader::TelegramReader;
use super::writer::{header_bytes, serialize_telegram};

/// One Masterlink telegram with its addressing, codes and payload.
///
/// Parsed telegrams keep the checksum byte as received; telegrams built for
/// sending are sealed so `payload_size` and `checksum` match the other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Telegram {
    pub dest_node: u8,
    pub dest_src: u8,
    pub src_node: u8,
    pub src_src: u8,
    pub payload_type: u8,
    pub payload_version: u8,
    pub payload_size: u8,
    pub telegram_type: u8,
    pub payload: Vec<u8>,
    pub checksum: u8,
}

impl Telegram {
    /// Build an unaddressed, sealed telegram.
    pub fn new(telegram_type: u8, payload_type: u8, payload_version: u8, payload: Vec<u8>) -> Self {
        let mut telegram = Self {
            telegram_type,
            payload_type,
            payload_version,
            payload,
            ..Self::default()
        };
        telegram.seal();
        telegram
    }

    /// Set the addressing fields and re-seal.
    pub fn addressed(mut self, dest_node: u8, dest_src: u8, src_node: u8, src_src: u8) -> Self {
        self.dest_node = dest_node;
        self.dest_src = dest_src;
        self.src_node = src_node;
        self.src_src = src_src;
        self.seal();
        self
    }

    /// Recompute `payload_size` and `checksum` from the other fields.
    ///
    /// Payloads longer than 255 bytes saturate the size field; serializing
    /// such a telegram fails with `PayloadTooLong`.
    pub fn seal(&mut self) {
        self.payload_size = u8::try_from(self.payload.len()).unwrap_or(u8::MAX);
        self.checksum = self.expected_checksum();
    }

    /// Checksum over the canonical header and the payload.
    pub fn expected_checksum(&self) -> u8 {
        checksum(&header_bytes(self)).wrapping_add(checksum(&self.payload))
    }

    pub fn checksum_ok(&self) -> bool {
        self.checksum == self.expected_checksum()
    }

    /// Check the trailing checksum.
    ///
    /// # Errors
    /// Returns `ChecksumMismatch` with the recomputed and the received byte.
    pub fn verify(&self) -> Result<(), TelegramError> {
        let expected = self.expected_checksum();
        if self.checksum != expected {
            return Err(TelegramError::ChecksumMismatch {
                expected,
                actual: self.checksum,
            });
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TelegramError> {
        serialize_telegram(self)
    }
}

/// Parse one telegram from a transport buffer.
///
/// Only structural problems fail the parse. A checksum mismatch still yields
/// the extracted fields; call [`Telegram::verify`] to decide what to do with
/// a corrupt telegram. The start marker and spare byte are fixed by the
/// protocol and not stored.
///
/// # Errors
/// Returns `TooShort` when the buffer cannot hold the header, the declared
/// payload and the checksum byte, and `InvalidFraming` when the start marker
/// or spare byte hold anything but their fixed values.
///
/// # Examples
/// ```
/// use masterlink_core::parse_telegram;
///
/// let raw = [0x80, 0xC0, 0x01, 0x0B, 0x00, 0x00, 0x00, 0x04, 0x03, 0x04, 0x01, 0x01, 0x01, 0x5A];
/// let telegram = parse_telegram(&raw)?;
/// assert_eq!(telegram.src_node, 0xC0);
/// assert_eq!(telegram.payload, vec![0x01, 0x01, 0x01]);
/// assert!(telegram.checksum_ok());
/// # Ok::<(), masterlink_core::TelegramError>(())
/// ```
pub fn parse_telegram(raw: &[u8]) -> Result<Telegram, TelegramError> {
    let reader = TelegramReader::new(raw);
    if let Err(err) = reader.require_len(layout::MIN_LEN) {
        debug!(len = raw.len(), "telegram shorter than header");
        return Err(err);
    }

    for (offset, expected) in [
        (layout::START_MARKER_OFFSET, layout::START_MARKER),
        (layout::SPARE_OFFSET, layout::SPARE),
    ] {
        let actual = reader.read_u8(offset)?;
        if actual != expected {
            debug!(offset, actual, "unexpected framing byte");
            return Err(TelegramError::InvalidFraming {
                offset,
                expected,
                actual,
            });
        }
    }

    let payload_size = reader.read_u8(layout::PAYLOAD_SIZE_OFFSET)?;
    let checksum_offset = layout::checksum_offset(payload_size as usize);
    if let Err(err) = reader.require_len(checksum_offset + layout::CHECKSUM_LEN) {
        debug!(
            len = raw.len(),
            payload_size, "telegram shorter than declared payload"
        );
        return Err(err);
    }

    let payload = reader
        .read_slice(layout::payload_range(payload_size as usize))?
        .to_vec();
    let telegram = Telegram {
        dest_node: reader.read_u8(layout::DEST_NODE_OFFSET)?,
        dest_src: reader.read_u8(layout::DEST_SRC_OFFSET)?,
        src_node: reader.read_u8(layout::SRC_NODE_OFFSET)?,
        src_src: reader.read_u8(layout::SRC_SRC_OFFSET)?,
        payload_type: reader.read_u8(layout::PAYLOAD_TYPE_OFFSET)?,
        payload_version: reader.read_u8(layout::PAYLOAD_VERSION_OFFSET)?,
        payload_size,
        telegram_type: reader.read_u8(layout::TELEGRAM_TYPE_OFFSET)?,
        payload,
        checksum: reader.read_u8(checksum_offset)?,
    };

    let expected = checksum(reader.checksummed_span(payload_size as usize)?);
    if expected != telegram.checksum {
        debug!(
            payload_type = telegram.payload_type,
            expected,
            actual = telegram.checksum,
            "telegram checksum mismatch"
        );
    }

    let trailing = reader.len() - (checksum_offset + layout::CHECKSUM_LEN);
    if trailing > 0 {
        trace!(trailing, "ignoring bytes after telegram checksum");
    }

    Ok(telegram)
}
