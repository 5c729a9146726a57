/// Masterlink telegram checksum: the wrapping 8-bit sum of every byte.
///
/// Applied to the header and payload (everything before the trailing
/// checksum byte) on both the parse and the serialize path.
///
/// # Examples
/// ```
/// use masterlink_core::checksum;
///
/// assert_eq!(checksum(&[]), 0);
/// assert_eq!(checksum(&[0xFF, 0x02]), 0x01);
/// ```
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}
