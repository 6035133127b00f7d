//! ANIM Core - Animation Container Format Definitions
//!
//! This crate provides the binary layout, structured model, validation and
//! codec for ANIM files. It performs no I/O and knows nothing about pixels:
//! the sprite sheet payload is carried as opaque bytes.
//!
//! ```rust
//! use anim_core::{decode, encode, AnimatedObject, AnimationMetadata, Frame, SpriteInfo};
//!
//! # fn main() -> anim_core::Result<()> {
//! let meta = AnimationMetadata {
//!     ratio: 1.0,
//!     frames: vec![Frame {
//!         sound: None,
//!         objects: Some(vec![AnimatedObject::new(0, 0.0, 0.0, 100.0, 255)]),
//!     }],
//! };
//! let bytes = encode(Some(&meta), Some(&SpriteInfo::single(64, 64)), Some(&[0u8; 8][..]))?;
//!
//! let decoded = decode(&bytes)?;
//! assert_eq!(decoded.metadata, meta);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod legacy;
pub mod model;
pub mod validation;

pub use decoder::{decode, decode_header, decode_sprite_table, DecodedAnimation, OwnedAnimation};
pub use encoder::encode;
pub use error::*;
pub use format::*;
pub use legacy::{LegacyAnimateFile, LegacyLayer, LegacySound};
pub use model::{AnimatedObject, AnimationMetadata, Frame, Sound};
pub use validation::ValidationReport;
