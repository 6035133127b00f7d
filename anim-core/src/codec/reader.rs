//! Cursor-based reader for ANIM buffers

use crate::{AnimError, Result};
use bytemuck::Pod;

/// Little-endian reader over a borrowed byte buffer
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a reader positioned at the start of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current cursor position
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying buffer
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left after the cursor
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Fail with `FileTruncated` unless `n` more bytes are available
    pub fn ensure(&self, n: usize) -> Result<()> {
        match self.offset.checked_add(n) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(AnimError::FileTruncated {
                position: self.offset,
                needed: n,
                available: self.remaining(),
            }),
        }
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read exactly `n` bytes as a string, one char per byte
    ///
    /// The format only stores ASCII here. Bytes above 0x7F are mapped to the
    /// Latin-1 code point of the same value rather than decoded as UTF-8, so
    /// a non-ASCII string does not round-trip with the same char count.
    pub fn read_ascii_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Borrow the next `n` bytes without copying
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let start = self.offset;
        self.offset += n;
        Ok(&self.data[start..self.offset])
    }

    /// Read a plain-old-data value with no alignment requirement on the buffer
    pub fn read_pod<T: Pod>(&mut self) -> Result<T> {
        let bytes = self.read_bytes(core::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Borrow the next `n` bytes without advancing
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        Ok(&self.data[self.offset..self.offset + n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [b'A', b'N', b'I', b'M', 0x01, 0x00, 0x00, 0x00, 0xAA, 0xBB];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_ascii_string(4).unwrap(), "ANIM");
        assert_eq!(reader.offset(), 4);
        assert_eq!(reader.read_u32_le().unwrap(), 1);
        assert_eq!(reader.read_bytes(2).unwrap(), &[0xAA, 0xBB]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_reports_offset() {
        let data = [0u8; 6];
        let mut reader = BinaryReader::new(&data);
        reader.read_u32_le().unwrap();

        let err = reader.read_u32_le().unwrap_err();
        assert_eq!(
            err,
            AnimError::FileTruncated {
                position: 4,
                needed: 4,
                available: 2
            }
        );
        // A failed read leaves the cursor untouched
        assert_eq!(reader.offset(), 4);
    }

    #[test]
    fn test_ensure_guards_overflow() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);
        reader.read_bytes(1).unwrap();
        assert!(reader.ensure(usize::MAX).is_err());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = *b"ANIMxxxx";
        let reader = BinaryReader::new(&data);
        assert_eq!(reader.peek_bytes(4).unwrap(), b"ANIM");
        assert_eq!(reader.offset(), 0);
    }

    #[test]
    fn test_non_ascii_bytes_map_to_latin1() {
        let data = [0xE9u8, b'a'];
        let mut reader = BinaryReader::new(&data);
        let s = reader.read_ascii_string(2).unwrap();
        assert_eq!(s.chars().count(), 2);
        assert_eq!(s.chars().next(), Some('\u{e9}'));
    }
}
