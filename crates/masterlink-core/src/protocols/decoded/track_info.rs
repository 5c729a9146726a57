use std::fmt;

use super::{source_field, write_header};
use crate::protocols::common::reader::hex_string;
use crate::protocols::names::{node, payload_type, telegram_type};
use crate::protocols::telegram::Telegram;

pub const SOURCE_OFFSET: usize = 1;

const PAYLOAD_VERSION: u8 = 0x05;
const TEMPLATE: [u8; 12] = [
    0x02, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
];

/// Track change announcement for a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub telegram: Telegram,
}

impl TrackInfo {
    pub fn decode(telegram: Telegram) -> Self {
        Self { telegram }
    }

    pub fn source(&self) -> Option<u8> {
        self.telegram.payload.get(SOURCE_OFFSET).copied()
    }

    /// Boilerplate track info broadcast on behalf of `source`.
    pub fn for_source(source: u8) -> Telegram {
        let mut payload = TEMPLATE.to_vec();
        payload[SOURCE_OFFSET] = source;
        Telegram::new(
            telegram_type::STATUS,
            payload_type::TRACK_INFO,
            PAYLOAD_VERSION,
            payload,
        )
        .addressed(node::ALL, 0x00, node::PC_1, source)
    }
}

impl fmt::Display for TrackInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.telegram)?;
        write!(
            f,
            " source={} payload=[{}]",
            source_field(self.source()),
            hex_string(&self.telegram.payload)
        )
    }
}
