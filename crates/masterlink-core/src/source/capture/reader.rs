use super::error::LineError;
use super::layout;

/// Decoded content of one capture line.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureLine {
    pub ts: Option<f64>,
    pub data: Vec<u8>,
}

/// Parse one capture line. Returns `Ok(None)` for blank and comment lines.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use masterlink_core::source::capture::reader::parse_line;
///
/// let line = parse_line("1700000000.5: C0 C1 01").unwrap().unwrap();
/// assert_eq!(line.ts, Some(1700000000.5));
/// assert_eq!(line.data, vec![0xC0, 0xC1, 0x01]);
/// ```
pub fn parse_line(line: &str) -> Result<Option<CaptureLine>, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(layout::COMMENT_PREFIX) {
        return Ok(None);
    }

    let (ts, hex) = match trimmed.split_once(layout::TIMESTAMP_SEPARATOR) {
        Some((ts, hex)) => (Some(parse_timestamp(ts.trim())?), hex),
        None => (None, trimmed),
    };
    let data = decode_hex(hex)?;
    if data.is_empty() {
        return Err(LineError::MissingBytes);
    }
    Ok(Some(CaptureLine { ts, data }))
}

fn parse_timestamp(value: &str) -> Result<f64, LineError> {
    match value.parse::<f64>() {
        Ok(ts) if ts.is_finite() && ts >= 0.0 => Ok(ts),
        _ => Err(LineError::InvalidTimestamp {
            value: value.to_string(),
        }),
    }
}

/// Decode hex digit pairs, ignoring whitespace between them.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, LineError> {
    let mut digits = Vec::with_capacity(text.len());
    for (index, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let value = ch.to_digit(16).ok_or(LineError::InvalidHexDigit {
            digit: ch,
            column: index + 1,
        })?;
        digits.push(value as u8);
    }
    if digits.len() % layout::HEX_DIGITS_PER_BYTE != 0 {
        return Err(LineError::OddDigitCount {
            count: digits.len(),
        });
    }
    Ok(digits
        .chunks(layout::HEX_DIGITS_PER_BYTE)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}
