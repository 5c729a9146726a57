mod capture;

pub use capture::error::LineError;
pub use capture::reader::decode_hex;
pub use capture::{CaptureFileSource, CaptureSource};

use thiserror::Error;

/// One framed telegram handed over by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TelegramEvent {
    /// 1-based position of the telegram in its input.
    pub line: usize,
    /// Unix timestamp in seconds, when the transport recorded one.
    pub ts: Option<f64>,
    pub data: Vec<u8>,
}

/// Transport yielding telegrams in input order.
///
/// A `SourceError::Format` covers a single input line; the next call resumes
/// after it. `SourceError::Io` is final.
pub trait TelegramSource {
    fn next_telegram(&mut self) -> Result<Option<TelegramEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture format error on line {line}: {message}")]
    Format { line: usize, message: String },
}

impl From<capture::error::CaptureError> for SourceError {
    fn from(value: capture::error::CaptureError) -> Self {
        match value {
            capture::error::CaptureError::Io(err) => SourceError::Io(err),
            capture::error::CaptureError::Line { line, source } => SourceError::Format {
                line,
                message: source.to_string(),
            },
        }
    }
}
