use std::fmt;

use super::{source_field, write_header};
use crate::protocols::names::{node, payload_type, telegram_type};
use crate::protocols::telegram::Telegram;

pub const REQUESTED_SOURCE_OFFSET: usize = 1;

const REQUEST_MARKER: u8 = 0x02;
const PAYLOAD_VERSION: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GotoSourceMeaning {
    Unknown,
    RequestSource,
}

impl GotoSourceMeaning {
    pub fn as_str(&self) -> &'static str {
        match self {
            GotoSourceMeaning::Unknown => "unknown",
            GotoSourceMeaning::RequestSource => "request-source",
        }
    }
}

/// Request to switch the link to another source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoSource {
    pub telegram: Telegram,
    pub requested_source: Option<u8>,
    pub meaning: GotoSourceMeaning,
}

impl GotoSource {
    pub fn decode(telegram: Telegram) -> Self {
        let requested_source = telegram.payload.get(REQUESTED_SOURCE_OFFSET).copied();
        let meaning = match requested_source {
            Some(_) => GotoSourceMeaning::RequestSource,
            None => GotoSourceMeaning::Unknown,
        };
        Self {
            telegram,
            requested_source,
            meaning,
        }
    }

    /// Command asking the video master to switch to `source`.
    pub fn request(source: u8) -> Telegram {
        Telegram::new(
            telegram_type::COMMAND,
            payload_type::GOTO_SOURCE,
            PAYLOAD_VERSION,
            vec![REQUEST_MARKER, source, 0x00, 0x00],
        )
        .addressed(node::V_MASTER, 0x00, node::PC_1, 0x00)
    }
}

impl fmt::Display for GotoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.telegram)?;
        write!(
            f,
            " meaning={} requested={}",
            self.meaning.as_str(),
            source_field(self.requested_source)
        )
    }
}
