//! Fixed-capacity writer for ANIM buffers

use crate::{AnimError, Result};
use bytemuck::Pod;

/// Little-endian writer over a buffer pre-allocated to its final size
///
/// Callers compute the exact total size up front; writing past it or
/// finishing short of it is a size mismatch, never a reallocation.
#[derive(Debug, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
    offset: usize,
}

impl BinaryWriter {
    /// Allocate a zeroed buffer of exactly `total_size` bytes
    pub fn with_size(total_size: usize) -> Self {
        Self {
            buffer: vec![0u8; total_size],
            offset: 0,
        }
    }

    /// Current cursor position
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Total size fixed at construction
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    fn reserve(&mut self, n: usize) -> Result<usize> {
        let start = self.offset;
        match start.checked_add(n) {
            Some(end) if end <= self.buffer.len() => {
                self.offset = end;
                Ok(start)
            }
            _ => Err(AnimError::SizeMismatch {
                message: format!(
                    "write of {n} bytes at offset {start} exceeds buffer of {} bytes",
                    self.buffer.len()
                ),
                position: Some(start),
            }),
        }
    }

    pub fn write_u32_le(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write the string's bytes as-is
    ///
    /// Only ASCII is expected. A non-ASCII string is written as its UTF-8
    /// bytes, which is more bytes than it has chars.
    pub fn write_ascii_string(&mut self, value: &str) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let start = self.reserve(bytes.len())?;
        self.buffer[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Write a plain-old-data value byte for byte
    pub fn write_pod<T: Pod>(&mut self, value: &T) -> Result<()> {
        self.write_bytes(bytemuck::bytes_of(value))
    }

    /// Return the buffer, requiring every byte to have been written
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.offset != self.buffer.len() {
            return Err(AnimError::SizeMismatch {
                message: format!(
                    "wrote {} bytes into a buffer of {} bytes",
                    self.offset,
                    self.buffer.len()
                ),
                position: Some(self.offset),
            });
        }
        Ok(self.buffer)
    }
}
