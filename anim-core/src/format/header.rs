//! ANIM file header
//!
//! The header is the first 16 bytes of every file: signature, version and the
//! byte sizes of the two variable-length sections that follow.

use super::constants::{FORMAT_VERSION, HEADER_SIZE, MAGIC};
use crate::codec::{BinaryReader, BinaryWriter};
use crate::{AnimError, Result};
use bytemuck::{Pod, Zeroable};

/// On-disk header layout, fields stored little-endian
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    signature: [u8; 4],
    version: u32,
    image_data_size: u32,
    meta_data_size: u32,
}

const _: () = assert!(core::mem::size_of::<RawHeader>() == HEADER_SIZE);

/// Fixed-size header for ANIM files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHeader {
    /// Magic bytes: "ANIM"
    pub signature: [u8; 4],
    /// Format version (not enforced on read)
    pub version: u32,
    /// Sprite table size plus pixel payload length
    pub image_data_size: u32,
    /// Byte length of the UTF-8 JSON metadata block
    pub meta_data_size: u32,
}

impl FormatHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Create a header for the current version
    pub const fn new(image_data_size: u32, meta_data_size: u32) -> Self {
        Self {
            signature: MAGIC,
            version: FORMAT_VERSION,
            image_data_size,
            meta_data_size,
        }
    }

    /// Check the signature
    pub fn is_valid(&self) -> bool {
        self.signature == MAGIC
    }

    /// Reject versions other than the one this crate writes
    ///
    /// `decode` does not call this; unknown versions are read as-is so newer
    /// files stay readable. Callers wanting strict gating opt in here.
    pub fn ensure_supported_version(&self) -> Result<()> {
        if self.version != FORMAT_VERSION {
            return Err(AnimError::UnsupportedVersion {
                version: self.version,
                position: 4,
            });
        }
        Ok(())
    }

    /// Read and validate the header at the reader's cursor
    ///
    /// A signature other than "ANIM" fails with `InvalidSignature` at the
    /// header's offset. A buffer that ends inside the header fails with
    /// `CorruptedHeader` carrying the offset where reading stopped.
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let start = reader.offset();
        let available = reader.remaining().min(MAGIC.len());
        let prefix = reader.peek_bytes(available)?;

        if prefix != &MAGIC[..available] {
            return Err(AnimError::InvalidSignature {
                actual: String::from_utf8_lossy(prefix).into_owned(),
                position: start,
            });
        }

        let raw: RawHeader = reader.read_pod().map_err(|err| match err {
            AnimError::FileTruncated { available, .. } => AnimError::CorruptedHeader {
                message: format!("header needs {HEADER_SIZE} bytes, {available} available"),
                position: start + available,
            },
            other => other,
        })?;

        Ok(Self {
            signature: raw.signature,
            version: u32::from_le(raw.version),
            image_data_size: u32::from_le(raw.image_data_size),
            meta_data_size: u32::from_le(raw.meta_data_size),
        })
    }

    /// Parse header from the start of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(&mut BinaryReader::new(bytes))
    }

    /// Write the header at the writer's cursor
    pub fn write_to(&self, writer: &mut BinaryWriter) -> Result<()> {
        writer.write_pod(&self.to_raw())
    }

    /// Convert header to bytes
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes.copy_from_slice(bytemuck::bytes_of(&self.to_raw()));
        bytes
    }

    fn to_raw(&self) -> RawHeader {
        RawHeader {
            signature: self.signature,
            version: self.version.to_le(),
            image_data_size: self.image_data_size.to_le(),
            meta_data_size: self.meta_data_size.to_le(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = FormatHeader::new(0x0102_0304, 42);
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"ANIM");
        assert_eq!(&bytes[4..8], &[1, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[12..16], &[42, 0, 0, 0]);

        assert_eq!(FormatHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_bad_signature() {
        let mut bytes = FormatHeader::new(12, 2).to_bytes();
        bytes[0..4].copy_from_slice(b"RIFF");

        let err = FormatHeader::from_bytes(&bytes).unwrap_err();
        assert_eq!(
            err,
            AnimError::InvalidSignature {
                actual: "RIFF".to_string(),
                position: 0
            }
        );
    }

    #[test]
    fn test_short_buffers() {
        // Signature matches but the header is cut short
        let err = FormatHeader::from_bytes(b"ANIM\x01\x00").unwrap_err();
        assert!(matches!(err, AnimError::CorruptedHeader { position: 6, .. }));

        // Too short to hold a signature, and what is there is wrong
        let err = FormatHeader::from_bytes(b"AX").unwrap_err();
        assert!(matches!(err, AnimError::InvalidSignature { position: 0, .. }));

        let err = FormatHeader::from_bytes(&[]).unwrap_err();
        assert!(matches!(err, AnimError::CorruptedHeader { position: 0, .. }));
    }

    #[test]
    fn test_unknown_version_is_read_but_gated_on_request() {
        let mut header = FormatHeader::new(12, 2);
        header.version = 7;

        let decoded = FormatHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(decoded.version, 7);
        assert_eq!(
            decoded.ensure_supported_version(),
            Err(AnimError::UnsupportedVersion {
                version: 7,
                position: 4
            })
        );
        assert!(FormatHeader::new(12, 2).ensure_supported_version().is_ok());
    }
}
