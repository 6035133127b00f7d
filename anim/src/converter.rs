//! Legacy to ANIM conversion
//!
//! The pure metadata mapping lives in `anim_core::legacy`. This module adds
//! the image half: decoding Base64 bitmaps and packing them into one sheet,
//! then encoding the finished file.

use crate::pixel_codec::{PackOptions, PixelCodec};
use crate::sprite_sheet::{PackedSheet, SpriteSheetProcessor};
use anim_core::legacy::convert_metadata;
use anim_core::validation::{parse_legacy, validate_legacy};
use anim_core::{encode, AnimError, LegacyAnimateFile, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

/// Standard alphabet, accepting payloads with or without `=` padding
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Strip a `data:<mime>;base64,` prefix if present
pub fn strip_data_uri(bitmap: &str) -> &str {
    if bitmap.starts_with("data:") {
        if let Some((_, payload)) = bitmap.split_once(',') {
            return payload;
        }
    }
    bitmap
}

/// Decode one Base64 or data-URI bitmap; whitespace in the payload is ignored
pub fn decode_bitmap(index: usize, bitmap: &str) -> Result<Vec<u8>> {
    let payload = strip_data_uri(bitmap);
    let decoded = if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        LENIENT_BASE64.decode(compact)
    } else {
        LENIENT_BASE64.decode(payload)
    };

    decoded.map_err(|err| AnimError::Base64Decode {
        index,
        message: err.to_string(),
    })
}

/// Decode every non-empty bitmap in parallel, keeping input order
///
/// Empty entries are dropped, so later images move down to fill the gap.
/// A failure reports the position of the bitmap in the original list.
pub fn decode_bitmaps<S>(bitmaps: &[S]) -> Result<Vec<Vec<u8>>>
where
    S: AsRef<str> + Sync,
{
    let results: Vec<Result<Vec<u8>>> = bitmaps
        .par_iter()
        .enumerate()
        .filter_map(|(index, bitmap)| {
            let bitmap: &str = bitmap.as_ref();
            (!bitmap.is_empty()).then(|| decode_bitmap(index, bitmap))
        })
        .collect();

    results.into_iter().collect()
}

/// Decode legacy bitmaps and pack them into one sprite sheet
///
/// Fails with `ConversionFailed` when every bitmap is empty.
pub async fn convert_images<C, S>(
    sheets: &SpriteSheetProcessor<C>,
    bitmaps: &[S],
    options: &PackOptions,
) -> Result<PackedSheet>
where
    C: PixelCodec,
    S: AsRef<str> + Sync,
{
    let images = decode_bitmaps(bitmaps)?;
    if images.is_empty() {
        return Err(AnimError::ConversionFailed {
            message: "no valid images found in bitmaps".to_string(),
        });
    }
    sheets.pack(images.as_slice(), options).await
}

/// Convert a validated legacy document into a complete ANIM buffer
pub async fn convert_to_new_format<C: PixelCodec>(
    sheets: &SpriteSheetProcessor<C>,
    legacy: &LegacyAnimateFile,
    options: &PackOptions,
) -> Result<Vec<u8>> {
    let packed = convert_images(sheets, legacy.bitmaps.as_slice(), options).await?;
    let metadata = convert_metadata(legacy)?;

    let buffer = encode(
        Some(&metadata),
        Some(&packed.sprite_info),
        Some(packed.pixel_payload.as_slice()),
    )?;
    debug!(
        frames = metadata.frames.len(),
        bitmaps = legacy.bitmaps.len(),
        len = buffer.len(),
        "converted legacy animation"
    );
    Ok(buffer)
}

/// Validate an already parsed legacy JSON tree and convert it
pub async fn convert_legacy_value<C: PixelCodec>(
    sheets: &SpriteSheetProcessor<C>,
    value: &Value,
    options: &PackOptions,
) -> Result<Vec<u8>> {
    let legacy = validate_legacy(value)?;
    convert_to_new_format(sheets, &legacy, options).await
}

/// Parse, validate and convert legacy JSON text
pub async fn convert_legacy_json<C: PixelCodec>(
    sheets: &SpriteSheetProcessor<C>,
    json_text: &str,
    options: &PackOptions,
) -> Result<Vec<u8>> {
    let legacy = parse_legacy(json_text)?;
    convert_to_new_format(sheets, &legacy, options).await
}
