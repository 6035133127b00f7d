//! Size arithmetic for ANIM sections
//!
//! Pure overflow-checked calculations shared by the encoder and decoder.

use crate::{AnimError, Result};

/// Convert a section length to its u32 header field
pub fn length_as_u32(len: usize, section: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| AnimError::SizeMismatch {
        message: format!("{section} of {len} bytes does not fit a u32 size field"),
        position: None,
    })
}

/// Pixel payload length implied by the header and sprite table
///
/// `image_data_size` covers the sprite table and the payload, so it can
/// never be smaller than the table itself.
pub fn pixel_payload_size(
    image_data_size: u32,
    table_size: usize,
    position: usize,
) -> Result<usize> {
    (image_data_size as usize)
        .checked_sub(table_size)
        .ok_or_else(|| AnimError::SizeMismatch {
            message: format!(
                "imageDataSize {image_data_size} is smaller than the {table_size}-byte sprite table"
            ),
            position: Some(position),
        })
}

/// Sum section sizes with overflow protection
pub fn checked_total_size(sections: &[usize]) -> Result<usize> {
    sections
        .iter()
        .try_fold(0usize, |total, &size| total.checked_add(size))
        .ok_or_else(|| AnimError::SizeMismatch {
            message: "total file size overflows".to_string(),
            position: None,
        })
}
