//! ANIM - Compact Binary Animation Files
//!
//! This library reads and writes ANIM files, packs frame images into sprite
//! sheets and converts legacy JSON+Base64 animations into the binary format.
//!
//! ## Architecture
//!
//! ANIM follows a clean format/implementation separation:
//!
//! - **anim-core**: Binary layout, model, validation, encode and decode (no pixels)
//! - **anim**: Pixel codec, sprite sheets and legacy image conversion
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anim::{AnimationCodec, AnimResult};
//!
//! async fn example(legacy_json: &str) -> AnimResult<()> {
//!     let codec = AnimationCodec::new();
//!
//!     // Convert a legacy animation and read it back
//!     let bytes = codec.convert_legacy_json(legacy_json).await?;
//!     let decoded = codec.decode(&bytes)?;
//!
//!     // Cut the second 50-pixel frame out of the packed sheet
//!     let frame = codec.extract_frame(&decoded, 1, 50, None).await?;
//!     println!("{} frames, first image {} bytes", decoded.metadata.frames.len(), frame.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Zero-copy decode**: the pixel payload borrows from the input buffer
//! - **Precise errors**: stable codes with offsets and field paths
//! - **Sprite sheets**: lossless WebP or PNG, with an optional lossy mode
//! - **Legacy conversion**: parallel Base64 decoding and sparse sound maps

// Re-export core abstractions and format definitions
pub use anim_core::{
    // Codec
    decode_header, decode_sprite_table, DecodedAnimation, OwnedAnimation,
    // Model
    AnimatedObject, AnimationMetadata, Frame, LegacyAnimateFile, Sound,
    // Format definitions
    FormatHeader, SpriteDimension, SpriteInfo,
    // Error handling
    AnimError, ErrorCategory, ErrorCode, Result as AnimResult,
    // Validation
    ValidationReport,
};

pub mod converter;
pub mod pixel_codec;
pub mod sprite_sheet;

pub use pixel_codec::{ImageCodec, ImageSize, PackOptions, PixelCodec, SheetFormat};
pub use sprite_sheet::{ExtractOptions, PackedSheet, SpriteSheetProcessor};

use serde_json::Value;

/// The four operations collaborators use, bundled with a pixel codec
#[derive(Debug, Clone, Default)]
pub struct AnimationCodec<C = ImageCodec> {
    sheets: SpriteSheetProcessor<C>,
    pack_options: PackOptions,
}

impl AnimationCodec<ImageCodec> {
    /// Codec using the `image` crate, writing lossless WebP sheets
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: PixelCodec> AnimationCodec<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            sheets: SpriteSheetProcessor::new(codec),
            pack_options: PackOptions::default(),
        }
    }

    /// Options used when legacy images are packed
    pub fn with_pack_options(mut self, options: PackOptions) -> Self {
        self.pack_options = options;
        self
    }

    pub fn pack_options(&self) -> &PackOptions {
        &self.pack_options
    }

    pub fn sprite_sheets(&self) -> &SpriteSheetProcessor<C> {
        &self.sheets
    }

    /// Decode an ANIM buffer; the pixel payload borrows from `buffer`
    pub fn decode<'a>(&self, buffer: &'a [u8]) -> AnimResult<DecodedAnimation<'a>> {
        anim_core::decode(buffer)
    }

    /// Validate and encode a bundle into an ANIM buffer
    pub fn encode(
        &self,
        meta: Option<&AnimationMetadata>,
        sprite_info: Option<&SpriteInfo>,
        pixel_payload: Option<&[u8]>,
    ) -> AnimResult<Vec<u8>> {
        anim_core::encode(meta, sprite_info, pixel_payload)
    }

    /// Convert a parsed legacy document into an ANIM buffer
    pub async fn convert_legacy(&self, legacy: &Value) -> AnimResult<Vec<u8>> {
        converter::convert_legacy_value(&self.sheets, legacy, &self.pack_options).await
    }

    /// Convert legacy JSON text into an ANIM buffer
    pub async fn convert_legacy_json(&self, json_text: &str) -> AnimResult<Vec<u8>> {
        converter::convert_legacy_json(&self.sheets, json_text, &self.pack_options).await
    }

    /// Cut frame `index` out of a decoded bundle's sprite sheet
    pub async fn extract_frame(
        &self,
        decoded: &DecodedAnimation<'_>,
        index: u32,
        frame_height: u32,
        frame_width: Option<u32>,
    ) -> AnimResult<Vec<u8>> {
        let options = ExtractOptions {
            height: frame_height,
            width: frame_width,
        };
        self.sheets
            .extract_frame_by_index(decoded.pixel_payload, index, options)
            .await
    }
}
