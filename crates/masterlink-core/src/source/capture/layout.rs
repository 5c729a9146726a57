pub const COMMENT_PREFIX: char = '#';
pub const TIMESTAMP_SEPARATOR: char = ':';
pub const HEX_DIGITS_PER_BYTE: usize = 2;
