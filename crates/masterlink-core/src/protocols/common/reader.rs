/// Uppercase hex bytes separated by single spaces.
///
/// # Examples
/// ```
/// assert_eq!(masterlink_core::hex_string(&[0x80, 0x0a]), "80 0A");
/// ```
pub fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lossy UTF-8 text with trailing NUL padding and whitespace removed.
pub(crate) fn padded_text(bytes: &[u8]) -> String {
    let raw = String::from_utf8_lossy(bytes);
    raw.trim_end_matches('\0').trim().to_string()
}

/// Printable ASCII as-is, every other byte as `.`.
pub(crate) fn printable_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| {
            if b.is_ascii_graphic() || *b == b' ' {
                *b as char
            } else {
                '.'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{hex_string, padded_text, printable_ascii};

    #[test]
    fn hex_string_formats_bytes() {
        assert_eq!(hex_string(&[0x01, 0xAB, 0x00]), "01 AB 00");
        assert_eq!(hex_string(&[]), "");
    }

    #[test]
    fn padded_text_trims_nul_padding() {
        assert_eq!(padded_text(b"Kind of Blue\0\0\0"), "Kind of Blue");
        assert_eq!(padded_text(b"\0\0"), "");
    }

    #[test]
    fn printable_ascii_masks_control_bytes() {
        assert_eq!(printable_ascii(b"CD\x01 12"), "CD. 12");
    }
}
