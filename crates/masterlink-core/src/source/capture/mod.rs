//! Text capture source.
//!
//! Reads telegrams logged by the serial adapter tooling: one telegram per
//! line as hex bytes, optionally prefixed by a Unix timestamp and a colon.
//! Blank lines and `#` comments are skipped.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{CaptureFileSource, CaptureSource};
