use std::fmt;

use super::write_header;
use crate::protocols::common::reader::printable_ascii;
use crate::protocols::telegram::Telegram;

/// Text pushed to a node's front panel display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayData {
    pub telegram: Telegram,
}

impl DisplayData {
    pub fn decode(telegram: Telegram) -> Self {
        Self { telegram }
    }

    /// Payload as printable ASCII, other bytes masked as `.`.
    pub fn text(&self) -> String {
        printable_ascii(&self.telegram.payload)
    }
}

impl fmt::Display for DisplayData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.telegram)?;
        write!(f, " text={:?}", self.text())
    }
}
