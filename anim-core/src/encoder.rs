//! ANIM encoding
//!
//! Inputs are validated in full before any byte is produced. The output
//! buffer is sized once from the section lengths and filled in file order.

use crate::codec::BinaryWriter;
use crate::format::constants::HEADER_SIZE;
use crate::format::{FormatHeader, SpriteInfo};
use crate::model::AnimationMetadata;
use crate::validation::{
    checked_total_size, length_as_u32, require_encode_inputs, validate_metadata,
    validate_sprite_info,
};
use crate::{AnimError, Result};
use tracing::debug;

/// Serialize metadata, sprite table and payload into one ANIM buffer
///
/// Absent inputs are reported together in one `Validation` error. The
/// returned buffer always satisfies
/// `len == 16 + imageDataSize + metaDataSize`.
pub fn encode(
    meta: Option<&AnimationMetadata>,
    sprite_info: Option<&SpriteInfo>,
    pixel_payload: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let (meta, sprite_info, pixel_payload) =
        require_encode_inputs(meta, sprite_info, pixel_payload)?;

    validate_sprite_info(sprite_info)?;
    validate_metadata(meta)?;

    let meta_bytes = serde_json::to_vec(meta).map_err(|err| AnimError::InvalidMetadata {
        message: format!("metadata could not be serialized: {err}"),
        position: None,
    })?;

    let table_size = sprite_info.table_size();
    let image_data_size = length_as_u32(
        checked_total_size(&[table_size, pixel_payload.len()])?,
        "sprite table and pixel payload",
    )?;
    let meta_data_size = length_as_u32(meta_bytes.len(), "metadata")?;
    let total = checked_total_size(&[HEADER_SIZE, image_data_size as usize, meta_bytes.len()])?;

    let mut writer = BinaryWriter::with_size(total);
    FormatHeader::new(image_data_size, meta_data_size).write_to(&mut writer)?;
    sprite_info.write_to(&mut writer)?;
    writer.write_bytes(pixel_payload)?;
    writer.write_bytes(&meta_bytes)?;

    debug!(
        sprites = sprite_info.count,
        frames = meta.frames.len(),
        image_data_size,
        meta_data_size,
        total,
        "encoded animation"
    );

    writer.finish()
}
