use super::error::TelegramError;
use super::layout;

pub struct TelegramReader<'a> {
    data: &'a [u8],
}

impl<'a> TelegramReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), TelegramError> {
        if self.data.len() < needed {
            return Err(TelegramError::TooShort {
                needed,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, TelegramError> {
        self.data
            .get(offset)
            .copied()
            .ok_or(TelegramError::TooShort {
                needed: offset + 1,
                actual: self.data.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], TelegramError> {
        self.data.get(range.clone()).ok_or(TelegramError::TooShort {
            needed: range.end,
            actual: self.data.len(),
        })
    }

    /// Header and payload bytes covered by the checksum.
    pub fn checksummed_span(&self, payload_size: usize) -> Result<&'a [u8], TelegramError> {
        self.read_slice(0..layout::checksum_offset(payload_size))
    }
}
