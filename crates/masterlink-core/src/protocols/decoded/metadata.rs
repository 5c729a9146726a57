//! Track metadata (genre, album, artist, track name) announced by a source.
//!
//! Only part of the payload is understood. [`EXPECTATIONS`] records, per
//! payload offset, the constant every capture so far carried there (`Some`)
//! or that the byte varies (`None`). Decoding never fails on a mismatch; it
//! shows up through [`Metadata::any_surprises_here`] so new captures that
//! break the assumptions are easy to spot.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{source_field, write_header};
use crate::protocols::common::reader::padded_text;
use crate::protocols::names::{PLACEHOLDER, field_type_label};
use crate::protocols::telegram::Telegram;

pub const FIELD_TYPE_OFFSET: usize = 0;
pub const SOURCE_OFFSET: usize = 4;
pub const TEXT_OFFSET: usize = 6;

pub const EXPECTATIONS: &[Option<u8>] = &[
    None,       // field type
    Some(0x00),
    Some(0x00),
    Some(0x01),
    None,       // source id
    Some(0x00),
];

/// A payload byte that broke an expectation; `actual` is `None` when the
/// payload ended before the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surprise {
    pub offset: usize,
    pub expected: u8,
    pub actual: Option<u8>,
}

impl fmt::Display for Surprise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.actual {
            Some(actual) => write!(
                f,
                "[{}] expected 0x{:02X} got 0x{:02X}",
                self.offset, self.expected, actual
            ),
            None => write!(f, "[{}] expected 0x{:02X} got nothing", self.offset, self.expected),
        }
    }
}

/// Compare a payload against an expectations table.
pub fn surprises_in(payload: &[u8], expectations: &[Option<u8>]) -> Vec<Surprise> {
    expectations
        .iter()
        .enumerate()
        .filter_map(|(offset, expected)| {
            let expected = (*expected)?;
            let actual = payload.get(offset).copied();
            if actual == Some(expected) {
                None
            } else {
                Some(Surprise {
                    offset,
                    expected,
                    actual,
                })
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub telegram: Telegram,
    pub field_type: Option<u8>,
    pub source: Option<u8>,
    pub key: String,
    pub value: String,
}

impl Metadata {
    pub fn decode(telegram: Telegram) -> Self {
        let payload = &telegram.payload;
        let field_type = payload.get(FIELD_TYPE_OFFSET).copied();
        let source = payload.get(SOURCE_OFFSET).copied();
        let key = field_type
            .map(field_type_label)
            .unwrap_or(PLACEHOLDER)
            .to_string();
        let value = payload
            .get(TEXT_OFFSET..)
            .map(padded_text)
            .unwrap_or_default();
        Self {
            telegram,
            field_type,
            source,
            key,
            value,
        }
    }

    pub fn surprises(&self) -> Vec<Surprise> {
        surprises_in(&self.telegram.payload, EXPECTATIONS)
    }

    pub fn any_surprises_here(&self) -> bool {
        !self.surprises().is_empty()
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.telegram)?;
        write!(
            f,
            " source={} {}={:?}",
            source_field(self.source),
            self.key,
            self.value
        )?;
        let surprises = self.surprises();
        if !surprises.is_empty() {
            let listed = surprises
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " surprises: {listed}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EXPECTATIONS, Metadata, Surprise, surprises_in};
    use crate::protocols::names::{field_type, payload_type, source, telegram_type};
    use crate::protocols::telegram::Telegram;

    fn metadata(payload: &[u8]) -> Metadata {
        Metadata::decode(Telegram::new(
            telegram_type::INFO,
            payload_type::METADATA,
            0x03,
            payload.to_vec(),
        ))
    }

    #[test]
    fn conforming_payload_decodes_key_value() {
        let meta = metadata(b"\x03\x00\x00\x01\x8d\x00Miles Davis\0\0");
        assert_eq!(meta.field_type, Some(field_type::ARTIST));
        assert_eq!(meta.key, "ARTIST");
        assert_eq!(meta.value, "Miles Davis");
        assert_eq!(meta.source, Some(source::CD));
        assert!(!meta.any_surprises_here());
        assert_eq!(
            meta.to_string(),
            "METADATA INFO ???(0x00) -> ???(0x00) source=CD ARTIST=\"Miles Davis\""
        );
    }

    #[test]
    fn one_mismatch_is_a_surprise() {
        let meta = metadata(b"\x02\x00\x07\x01\x29\x00Kind of Blue");
        assert_eq!(meta.key, "ALBUM");
        assert_eq!(meta.value, "Kind of Blue");
        assert!(meta.any_surprises_here());
        assert_eq!(
            meta.surprises(),
            vec![Surprise {
                offset: 2,
                expected: 0x00,
                actual: Some(0x07)
            }]
        );
        assert!(meta.to_string().contains("surprises: [2] expected 0x00 got 0x07"));
    }

    #[test]
    fn truncated_payload_misses_expected_bytes() {
        let meta = metadata(&[0x01, 0x00]);
        assert_eq!(meta.key, "GENRE");
        assert_eq!(meta.source, None);
        assert_eq!(meta.value, "");
        let offsets: Vec<usize> = meta.surprises().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![2, 3, 5]);
    }

    #[test]
    fn unknown_field_type_uses_placeholder() {
        let meta = metadata(b"\x09\x00\x00\x01\x6f\x00x");
        assert_eq!(meta.key, "???");
        assert!(!meta.any_surprises_here());
    }

    #[test]
    fn free_offsets_never_surprise() {
        let payload = [0xAA, 0x00, 0x00, 0x01, 0xBB, 0x00];
        assert!(surprises_in(&payload, EXPECTATIONS).is_empty());
    }
}
