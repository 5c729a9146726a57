use std::fmt;

use super::write_header;
use crate::protocols::common::reader::hex_string;
use crate::protocols::telegram::Telegram;

/// Telegram whose payload type has no dedicated decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unknown {
    pub telegram: Telegram,
}

impl Unknown {
    pub fn decode(telegram: Telegram) -> Self {
        Self { telegram }
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.telegram)?;
        write!(
            f,
            " v{} payload=[{}]",
            self.telegram.payload_version,
            hex_string(&self.telegram.payload)
        )
    }
}
