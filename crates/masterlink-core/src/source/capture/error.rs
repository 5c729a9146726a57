use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Line { line: usize, source: LineError },
}

/// Problems with a single capture line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },
    #[error("invalid hex digit '{digit}' at column {column}")]
    InvalidHexDigit { digit: char, column: usize },
    #[error("odd number of hex digits ({count})")]
    OddDigitCount { count: usize },
    #[error("no telegram bytes after timestamp")]
    MissingBytes,
}
