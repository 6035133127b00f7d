//! Binary format definitions for the ANIM container
//!
//! ```text
//! offset 0   [4]  signature = "ANIM"
//! offset 4   [4]  version
//! offset 8   [4]  imageDataSize   == spriteTableSize + len(pixelPayload)
//! offset 12  [4]  metaDataSize    == len(metadataBytes)
//! offset 16  [4]  spriteCount
//! offset 20  [8 x spriteCount] (width, height) pairs
//! ...        [pixelPayload bytes]
//! ...        [metadataBytes: UTF-8 JSON]
//! ```
//!
//! All integers are little-endian u32.

pub mod constants;
pub mod header;
pub mod sprite;

pub use header::FormatHeader;
pub use sprite::{sprite_table_size, SpriteDimension, SpriteInfo};
