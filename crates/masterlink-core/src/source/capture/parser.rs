use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use crate::source::{SourceError, TelegramEvent, TelegramSource};

use super::error::CaptureError;
use super::reader::parse_line;

/// Telegram source over any line-oriented reader.
pub struct CaptureSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

/// Capture source backed by a file on disk.
pub type CaptureFileSource = CaptureSource<BufReader<File>>;

impl CaptureFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> CaptureSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> TelegramSource for CaptureSource<R> {
    fn next_telegram(&mut self) -> Result<Option<TelegramEvent>, SourceError> {
        next_telegram(self).map_err(SourceError::from)
    }
}

fn next_telegram<R: BufRead>(
    source: &mut CaptureSource<R>,
) -> Result<Option<TelegramEvent>, CaptureError> {
    loop {
        source.buf.clear();
        if source.reader.read_line(&mut source.buf)? == 0 {
            return Ok(None);
        }
        source.line += 1;
        let line = source.line;
        match parse_line(&source.buf) {
            Ok(Some(parsed)) => {
                return Ok(Some(TelegramEvent {
                    line,
                    ts: parsed.ts,
                    data: parsed.data,
                }));
            }
            Ok(None) => trace!(line, "skipping capture line"),
            Err(err) => return Err(CaptureError::Line { line, source: err }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::CaptureSource;
    use crate::source::{SourceError, TelegramSource};

    #[test]
    fn yields_telegrams_with_line_numbers() {
        let input = "# header\n\n1.5: 01 02\n03 04\n";
        let mut source = CaptureSource::new(Cursor::new(input));

        let first = source.next_telegram().unwrap().unwrap();
        assert_eq!(first.line, 3);
        assert_eq!(first.ts, Some(1.5));
        assert_eq!(first.data, vec![0x01, 0x02]);

        let second = source.next_telegram().unwrap().unwrap();
        assert_eq!(second.line, 4);
        assert_eq!(second.ts, None);

        assert!(source.next_telegram().unwrap().is_none());
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let mut source = CaptureSource::new(Cursor::new("01 02\nzz\n"));
        source.next_telegram().unwrap();
        let err = source.next_telegram().unwrap_err();
        match err {
            SourceError::Format { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("invalid hex digit"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn resumes_after_malformed_line() {
        let mut source = CaptureSource::new(Cursor::new("zz\n01 02\n"));
        assert!(source.next_telegram().is_err());
        let next = source.next_telegram().unwrap().unwrap();
        assert_eq!(next.line, 2);
        assert_eq!(next.data, vec![0x01, 0x02]);
        assert!(source.next_telegram().unwrap().is_none());
    }
}
