//! Validation for everything that crosses the format boundary
//!
//! Untrusted JSON is checked field by field with dotted paths so a failure
//! names the exact offending value. Typed inputs are checked before encode
//! writes a single byte.

pub mod bounds;
pub mod legacy;
pub mod metadata;
pub mod report;
pub mod sprite;
pub mod value;

pub use bounds::{checked_total_size, length_as_u32, pixel_payload_size};
pub use legacy::{parse_legacy, parse_legacy_value, validate_legacy};
pub use metadata::{ensure_metadata_object, metadata_from_value, validate_metadata};
pub use report::{check_bundle, check_legacy, check_metadata, check_sprite_info, ValidationReport};
pub use sprite::validate_sprite_info;

use crate::format::SpriteInfo;
use crate::model::AnimationMetadata;
use crate::{AnimError, Result};

/// Names of the encode inputs, as reported in `missing_fields`
pub const ENCODE_INPUTS: [&str; 3] = ["meta", "spriteInfo", "pixelPayload"];

/// Unwrap the encode inputs, failing with one error naming every absent one
pub fn require_encode_inputs<'i>(
    meta: Option<&'i AnimationMetadata>,
    sprite_info: Option<&'i SpriteInfo>,
    pixel_payload: Option<&'i [u8]>,
) -> Result<(&'i AnimationMetadata, &'i SpriteInfo, &'i [u8])> {
    if let (Some(meta), Some(sprite_info), Some(pixel_payload)) = (meta, sprite_info, pixel_payload)
    {
        return Ok((meta, sprite_info, pixel_payload));
    }

    let present = [meta.is_some(), sprite_info.is_some(), pixel_payload.is_some()];
    let missing: Vec<String> = ENCODE_INPUTS
        .iter()
        .zip(present)
        .filter(|(_, present)| !present)
        .map(|(name, _)| name.to_string())
        .collect();
    Err(AnimError::Validation {
        message: "encode input is incomplete".to_string(),
        missing_fields: missing,
        field_path: None,
    })
}
