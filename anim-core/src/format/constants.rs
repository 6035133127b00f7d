//! Format constants and magic bytes for the ANIM container

/// Signature occupying the first four bytes of every file
pub const MAGIC: [u8; 4] = *b"ANIM";

/// Version written by the encoder
pub const FORMAT_VERSION: u32 = 1;

/// Fixed size of the file header (signature + three u32 fields)
pub const HEADER_SIZE: usize = 16;

/// Size of the sprite count field that opens the sprite table
pub const SPRITE_COUNT_SIZE: usize = 4;

/// Size of one (width, height) pair in the sprite table
pub const SPRITE_DIMENSION_SIZE: usize = 8;

/// Maximum legacy frame count, to prevent memory exhaustion
pub const MAX_FRAME_COUNT: u32 = 1_000_000;

/// Animated object layout on disk
pub mod object {
    /// Elements written by the encoder: index, x, y, scale, opacity, mirror, rotate
    pub const TUPLE_LEN: usize = 7;

    /// Shortest tuple accepted on read (mirror and rotate omitted)
    pub const MIN_TUPLE_LEN: usize = 5;

    /// Largest opacity value
    pub const MAX_OPACITY: u8 = 255;
}
