//! The 6912-byte ZX Spectrum screen format.
//!
//! An SCR buffer is a straight dump of screen memory: 6144 bytes of
//! bit-planed pixels in the hardware's interleaved row order, followed by
//! 768 attribute bytes, one per 8x8 block of the 32x24 grid.
//!
//! Frames larger than one screen are split into 256x192 tiles, each encoded
//! to its own buffer.

mod decode;
mod encode;
mod fill;
mod layout;

pub use decode::decode_scr;
pub use encode::{encode_tile, encode_tiles, tile_grid, ScrTile};
pub use fill::compute_fill_bytes;
pub use layout::{attr_address, pixel_address};

/// Total size of an SCR buffer.
pub const SCR_SIZE: usize = PIXEL_BYTES + ATTR_BYTES;

/// Size of the bit-planed pixel section.
pub const PIXEL_BYTES: usize = 6144;

/// Size of the attribute section.
pub const ATTR_BYTES: usize = 768;

/// Screen width in pixels.
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels.
pub const SCREEN_HEIGHT: usize = 192;

/// Attribute columns per screen.
pub const SCREEN_COLS: usize = SCREEN_WIDTH / 8;

/// Attribute rows per screen.
pub const SCREEN_ROWS: usize = SCREEN_HEIGHT / 8;
