//! Bounds-checked little-endian primitives over in-memory buffers
//!
//! The reader never panics on short input: every read checks
//! `offset + n <= len` first and reports the offset it stopped at. The writer
//! works over a buffer allocated once at the exact total size.

pub mod reader;
pub mod writer;

pub use reader::BinaryReader;
pub use writer::BinaryWriter;
