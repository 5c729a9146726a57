use std::fmt;

use super::write_header;
use crate::protocols::common::reader::hex_string;
use crate::protocols::names::{is_broadcast, node, payload_type, telegram_type};
use crate::protocols::telegram::Telegram;

const REPLY_VERSION: u8 = 0x04;
const REPLY_PAYLOAD: [u8; 3] = [0x01, 0x01, 0x01];

/// Presence poll from a master, or a node's answer to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterPresent {
    pub telegram: Telegram,
}

impl MasterPresent {
    pub fn decode(telegram: Telegram) -> Self {
        Self { telegram }
    }

    pub fn is_request(&self) -> bool {
        self.telegram.telegram_type == telegram_type::REQUEST
    }

    /// Acknowledge a presence request.
    ///
    /// The reply goes back to the requesting node and source. It is sent from
    /// the node the request was addressed to, or from `PC_1` when the request
    /// was broadcast.
    ///
    /// # Examples
    /// ```
    /// use masterlink_core::{MasterPresent, parse_telegram};
    ///
    /// let raw = [0x80, 0xC0, 0x01, 0x0B, 0x00, 0x00, 0x00, 0x04, 0x03, 0x04, 0x01, 0x01, 0x01, 0x5A];
    /// let request = MasterPresent::decode(parse_telegram(&raw)?);
    /// let reply = MasterPresent::reply_from_request(&request);
    /// assert_eq!(reply.dest_node, 0xC0);
    /// assert_eq!(reply.src_node, 0xC2);
    /// # Ok::<(), masterlink_core::TelegramError>(())
    /// ```
    pub fn reply_from_request(request: &MasterPresent) -> Telegram {
        let received = &request.telegram;
        let sender = if is_broadcast(received.dest_node) {
            node::PC_1
        } else {
            received.dest_node
        };
        Telegram::new(
            telegram_type::STATUS,
            payload_type::MASTER_PRESENT,
            REPLY_VERSION,
            REPLY_PAYLOAD.to_vec(),
        )
        .addressed(received.src_node, received.src_src, sender, received.dest_src)
    }
}

impl fmt::Display for MasterPresent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.telegram)?;
        write!(f, " payload=[{}]", hex_string(&self.telegram.payload))
    }
}
