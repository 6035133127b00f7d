//! Sprite table definitions
//!
//! The sprite table follows the header: a u32 sheet count and one
//! (width, height) pair per sheet.

use super::constants::{SPRITE_COUNT_SIZE, SPRITE_DIMENSION_SIZE};
use crate::codec::{BinaryReader, BinaryWriter};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Pixel size of one sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDimension {
    pub width: u32,
    pub height: u32,
}

impl SpriteDimension {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Sprite table: sheet count and the dimensions of each sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteInfo {
    /// Number of sprite sheets; must equal `dimensions.len()`
    pub count: u32,
    pub dimensions: Vec<SpriteDimension>,
}

/// Bytes occupied by a sprite table holding `count` entries
pub const fn sprite_table_size(count: u32) -> usize {
    SPRITE_COUNT_SIZE + SPRITE_DIMENSION_SIZE * count as usize
}

impl SpriteInfo {
    /// Table describing a single packed sheet
    pub fn single(width: u32, height: u32) -> Self {
        Self {
            count: 1,
            dimensions: vec![SpriteDimension::new(width, height)],
        }
    }

    /// Bytes this table occupies on disk
    pub const fn table_size(&self) -> usize {
        sprite_table_size(self.count)
    }

    /// Read the sprite table at the reader's cursor
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let count = reader.read_u32_le()?;

        // Check the whole table is present before allocating for it
        reader.ensure(SPRITE_DIMENSION_SIZE.saturating_mul(count as usize))?;

        let mut dimensions = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let width = reader.read_u32_le()?;
            let height = reader.read_u32_le()?;
            dimensions.push(SpriteDimension { width, height });
        }

        Ok(Self { count, dimensions })
    }

    /// Write the sprite table at the writer's cursor
    pub fn write_to(&self, writer: &mut BinaryWriter) -> Result<()> {
        writer.write_u32_le(self.count)?;
        for dim in &self.dimensions {
            writer.write_u32_le(dim.width)?;
            writer.write_u32_le(dim.height)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnimError;

    #[test]
    fn test_table_size() {
        assert_eq!(sprite_table_size(0), 4);
        assert_eq!(sprite_table_size(1), 12);
        assert_eq!(SpriteInfo::single(10, 20).table_size(), 12);
    }

    #[test]
    fn test_sprite_table_layout() {
        let info = SpriteInfo {
            count: 2,
            dimensions: vec![SpriteDimension::new(120, 150), SpriteDimension::new(3, 4)],
        };

        let mut writer = BinaryWriter::with_size(info.table_size());
        info.write_to(&mut writer).unwrap();
        let bytes = writer.finish().unwrap();

        assert_eq!(&bytes[0..4], &[2, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[120, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[150, 0, 0, 0]);

        let mut reader = BinaryReader::new(&bytes);
        assert_eq!(SpriteInfo::read_from(&mut reader).unwrap(), info);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_truncated_table() {
        // Claims a million sheets with only one pair present
        let mut bytes = 1_000_000u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[1, 0, 0, 0, 1, 0, 0, 0]);

        let err = SpriteInfo::read_from(&mut BinaryReader::new(&bytes)).unwrap_err();
        assert!(matches!(err, AnimError::FileTruncated { position: 4, .. }));
    }
}
