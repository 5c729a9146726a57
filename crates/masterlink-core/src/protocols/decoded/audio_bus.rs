use std::fmt;

use super::{source_field, write_header};
use crate::protocols::names::{node, payload_type, telegram_type};
use crate::protocols::telegram::Telegram;

pub const DISCRIMINANT_OFFSET: usize = 0;
pub const DISTRIBUTED_SOURCE_OFFSET: usize = 1;

pub const NOT_DISTRIBUTING: u8 = 0x00;
pub const DISTRIBUTING: u8 = 0x01;

const PAYLOAD_VERSION: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioBusMeaning {
    Unknown,
    RequestStatus,
    StatusNotDistributing,
    StatusDistributing,
}

impl AudioBusMeaning {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioBusMeaning::Unknown => "unknown",
            AudioBusMeaning::RequestStatus => "request-status",
            AudioBusMeaning::StatusNotDistributing => "status-not-distributing",
            AudioBusMeaning::StatusDistributing => "status-distributing",
        }
    }
}

/// Audio bus distribution request or status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBus {
    pub telegram: Telegram,
    pub meaning: AudioBusMeaning,
    pub distributed_source: Option<u8>,
}

impl AudioBus {
    pub fn decode(telegram: Telegram) -> Self {
        let discriminant = telegram.payload.get(DISCRIMINANT_OFFSET).copied();
        let meaning = match (telegram.telegram_type, discriminant) {
            (telegram_type::REQUEST, None) => AudioBusMeaning::RequestStatus,
            (telegram_type::STATUS, None | Some(NOT_DISTRIBUTING)) => {
                AudioBusMeaning::StatusNotDistributing
            }
            (telegram_type::STATUS, Some(DISTRIBUTING)) => AudioBusMeaning::StatusDistributing,
            _ => AudioBusMeaning::Unknown,
        };
        let distributed_source = match meaning {
            AudioBusMeaning::StatusDistributing => {
                telegram.payload.get(DISTRIBUTED_SOURCE_OFFSET).copied()
            }
            _ => None,
        };
        Self {
            telegram,
            meaning,
            distributed_source,
        }
    }

    /// Ask the audio master whether it is distributing a source.
    pub fn status_request() -> Telegram {
        Telegram::new(
            telegram_type::REQUEST,
            payload_type::AUDIO_BUS,
            PAYLOAD_VERSION,
            Vec::new(),
        )
        .addressed(node::A_MASTER, 0x00, node::PC_1, 0x00)
    }
}

impl fmt::Display for AudioBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.telegram)?;
        write!(f, " meaning={}", self.meaning.as_str())?;
        if self.distributed_source.is_some() {
            write!(f, " source={}", source_field(self.distributed_source))?;
        }
        Ok(())
    }
}
