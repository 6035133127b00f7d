//! Sprite table validation

use super::value::{join_index, join_key};
use crate::format::{SpriteDimension, SpriteInfo};
use crate::{AnimError, Result};

/// Root path used for sprite table field paths
pub const SPRITE_INFO_PATH: &str = "spriteInfo";

pub fn validate_sprite_dimension(dim: &SpriteDimension, path: &str) -> Result<()> {
    if dim.width == 0 {
        return Err(AnimError::out_of_range(join_key(path, "width"), "width must be > 0"));
    }
    if dim.height == 0 {
        return Err(AnimError::out_of_range(join_key(path, "height"), "height must be > 0"));
    }
    Ok(())
}

/// Check the sprite table, including `count == dimensions.len()`
pub fn validate_sprite_info(info: &SpriteInfo) -> Result<()> {
    if info.count as usize != info.dimensions.len() {
        return Err(AnimError::InvalidArrayLength {
            field_path: join_key(SPRITE_INFO_PATH, "dimensions"),
            expected: info.count.to_string(),
            actual: info.dimensions.len(),
        });
    }

    let dims_path = join_key(SPRITE_INFO_PATH, "dimensions");
    for (i, dim) in info.dimensions.iter().enumerate() {
        validate_sprite_dimension(dim, &join_index(&dims_path, i))?;
    }
    Ok(())
}
