//! Masterlink protocol decoding.
//!
//! Telegram framing follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access
//! - `parser` / `writer`: telegram decoding and encoding
//! - `error`: explicit, actionable errors
//!
//! `decoded` turns a parsed telegram into a typed variant and `names` holds
//! the reference tables used for rendering. Nothing in here performs I/O.

pub(crate) mod common;
pub mod decoded;
pub mod names;
pub mod telegram;
