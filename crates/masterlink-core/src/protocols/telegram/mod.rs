//! Masterlink telegram framing.
//!
//! A telegram is a fixed ten byte header (addressing, telegram type, payload
//! type, payload size and version), the payload, and a trailing checksum byte.
//! Parsing only fails on structural problems; a checksum mismatch is reported
//! by `Telegram::verify` so callers can keep or drop corrupt telegrams.
//!
//! Byte offsets live in `layout`, bounds-checked access in `reader`, and the
//! checksum arithmetic in `checksum`. `writer` produces transport buffers with
//! the same layout.

pub mod checksum;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use checksum::checksum;
pub use error::TelegramError;
pub use parser::{Telegram, parse_telegram};
pub use writer::serialize_telegram;
