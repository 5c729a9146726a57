pub const DEST_NODE_OFFSET: usize = 0;
pub const SRC_NODE_OFFSET: usize = 1;
pub const START_MARKER_OFFSET: usize = 2;
pub const TELEGRAM_TYPE_OFFSET: usize = 3;
pub const DEST_SRC_OFFSET: usize = 4;
pub const SRC_SRC_OFFSET: usize = 5;
pub const SPARE_OFFSET: usize = 6;
pub const PAYLOAD_TYPE_OFFSET: usize = 7;
pub const PAYLOAD_SIZE_OFFSET: usize = 8;
pub const PAYLOAD_VERSION_OFFSET: usize = 9;
pub const PAYLOAD_OFFSET: usize = 10;

pub const HEADER_LEN: usize = PAYLOAD_OFFSET;
pub const CHECKSUM_LEN: usize = 1;
pub const MIN_LEN: usize = HEADER_LEN + CHECKSUM_LEN;
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

pub const START_MARKER: u8 = 0x01;
pub const SPARE: u8 = 0x00;

/// Byte range of the payload for a declared payload size.
pub fn payload_range(payload_size: usize) -> std::ops::Range<usize> {
    PAYLOAD_OFFSET..PAYLOAD_OFFSET + payload_size
}

/// Offset of the trailing checksum for a declared payload size.
pub fn checksum_offset(payload_size: usize) -> usize {
    PAYLOAD_OFFSET + payload_size
}
