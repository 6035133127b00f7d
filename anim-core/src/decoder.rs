//! ANIM decoding
//!
//! Decoding walks the buffer front to back with a bounds-checked reader:
//! header, sprite table, pixel payload, metadata. The pixel payload is
//! returned as a borrowed slice of the input; nothing is copied until the
//! caller asks for an owned result.

use crate::codec::BinaryReader;
use crate::format::constants::FORMAT_VERSION;
use crate::format::{FormatHeader, SpriteInfo};
use crate::model::AnimationMetadata;
use crate::validation::{ensure_metadata_object, metadata_from_value, pixel_payload_size};
use crate::{AnimError, Result};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// A decoded file borrowing its pixel payload from the input buffer
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAnimation<'a> {
    pub header: FormatHeader,
    pub metadata: AnimationMetadata,
    pub sprite_info: SpriteInfo,
    /// Encoded sprite sheet bytes, opaque to this crate
    pub pixel_payload: &'a [u8],
}

/// A decoded file that owns all of its data
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedAnimation {
    pub header: FormatHeader,
    pub metadata: AnimationMetadata,
    pub sprite_info: SpriteInfo,
    pub pixel_payload: Vec<u8>,
}

impl DecodedAnimation<'_> {
    /// Copy the payload out so the result outlives the input buffer
    pub fn into_owned(self) -> OwnedAnimation {
        OwnedAnimation {
            header: self.header,
            metadata: self.metadata,
            sprite_info: self.sprite_info,
            pixel_payload: self.pixel_payload.to_vec(),
        }
    }
}

/// Read only the 16-byte header
pub fn decode_header(buffer: &[u8]) -> Result<FormatHeader> {
    FormatHeader::from_bytes(buffer)
}

/// Read the header and sprite table without touching payload or metadata
pub fn decode_sprite_table(buffer: &[u8]) -> Result<(FormatHeader, SpriteInfo)> {
    let mut reader = BinaryReader::new(buffer);
    let header = FormatHeader::read_from(&mut reader)?;
    let sprite_info = SpriteInfo::read_from(&mut reader)?;
    Ok((header, sprite_info))
}

/// Decode a complete ANIM buffer
///
/// Fails with `InvalidSignature` or `CorruptedHeader` on a bad header,
/// `FileTruncated` when a section runs past the end of the buffer,
/// `SizeMismatch` when the header sizes contradict the sprite table and
/// `InvalidMetadata` or a validation error when the JSON block is unusable.
pub fn decode(buffer: &[u8]) -> Result<DecodedAnimation<'_>> {
    let mut reader = BinaryReader::new(buffer);

    let header = FormatHeader::read_from(&mut reader)?;
    if header.version != FORMAT_VERSION {
        warn!(
            version = header.version,
            supported = FORMAT_VERSION,
            "decoding file with unknown format version"
        );
    }
    trace!(
        image_data_size = header.image_data_size,
        meta_data_size = header.meta_data_size,
        "read header"
    );

    let table_start = reader.offset();
    let sprite_info = SpriteInfo::read_from(&mut reader)?;
    let payload_len = pixel_payload_size(
        header.image_data_size,
        sprite_info.table_size(),
        table_start,
    )?;
    trace!(count = sprite_info.count, payload_len, "read sprite table");

    let pixel_payload = reader.read_bytes(payload_len)?;

    let meta_start = reader.offset();
    let meta_bytes = reader.read_bytes(header.meta_data_size as usize)?;
    let metadata = parse_metadata(meta_bytes, meta_start)?;

    if reader.remaining() > 0 {
        warn!(
            trailing = reader.remaining(),
            offset = reader.offset(),
            "ignoring bytes after metadata block"
        );
    }

    debug!(
        sprites = sprite_info.count,
        frames = metadata.frames.len(),
        payload_len,
        "decoded animation"
    );

    Ok(DecodedAnimation {
        header,
        metadata,
        sprite_info,
        pixel_payload,
    })
}

fn parse_metadata(bytes: &[u8], position: usize) -> Result<AnimationMetadata> {
    let text = core::str::from_utf8(bytes).map_err(|err| AnimError::InvalidMetadata {
        message: format!("metadata is not valid UTF-8: {err}"),
        position: Some(position + err.valid_up_to()),
    })?;

    let value: Value = serde_json::from_str(text).map_err(|err| AnimError::InvalidMetadata {
        message: format!("metadata is not valid JSON: {err}"),
        position: Some(position),
    })?;

    ensure_metadata_object(&value)?;
    metadata_from_value(&value)
}
