//! zx-screen: ZX Spectrum attribute quantization and SCR screen codec
//!
//! Converts full-color RGBA images into the Spectrum's display model: a
//! 1-bit pixel plane where every 8x8 block shows exactly two of eight base
//! colors, selected by an INK/PAPER/BRIGHT/FLASH attribute byte. Frames are
//! serialized to (and read back from) the 6912-byte `.scr` screen dump.
//!
//! # Pipeline
//!
//! ```text
//! RGBA input
//!     |
//!     +---> saturate_full            (optional, color)
//!     |
//!     +---> dither_rgba_channels     (per-channel binarization, dither)
//!     |
//!     +---> reduce_to_dominant_pair  (two colors per block, reduce)
//!     |
//!     +---> index                    (pixel indices + attributes, indexed)
//!     |        ^
//!     |        +-- compute_bright_attrs / apply_flash_attrs
//!     |
//!     +---> encode_tiles             (normalize, fill, tile, scr)
//!     v
//! 6912-byte SCR buffers
//! ```
//!
//! # Example
//!
//! ```
//! use zx_screen::{
//!     decode_scr, dither_rgba_channels, encode_tiles, index, reduce_to_dominant_pair,
//!     DitherAlgorithm, IndexOptions,
//! };
//!
//! let (width, height) = (16, 8);
//! let mut rgba = vec![0u8; width * height * 4];
//! for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
//!     let v = (i * 2) as u8;
//!     px.copy_from_slice(&[v, 255 - v, 40, 255]);
//! }
//!
//! dither_rgba_channels(&mut rgba, width, height, DitherAlgorithm::Bayer4, 0.5).unwrap();
//! reduce_to_dominant_pair(&mut rgba, width, height).unwrap();
//! let mut frame = index(&rgba, width, height, &IndexOptions::new()).unwrap();
//!
//! let tiles = encode_tiles(&mut frame, false);
//! assert_eq!(tiles.len(), 1);
//!
//! let screen = decode_scr(&tiles[0].bytes[..]).unwrap();
//! assert_eq!(screen.pixel(3, 5), frame.pixel(3, 5));
//! ```

pub mod api;
pub mod color;
pub mod depth;
pub mod dither;
pub mod indexed;
pub mod palette;
pub mod reduce;
pub mod scr;


pub use api::{AlgorithmError, ScreenError, ShapeError};
pub use color::saturate_full;
pub use dither::{dither_rgba_channels, DitherAlgorithm};
pub use indexed::{apply_flash_attrs, compute_bright_attrs, index, Attribute, IndexOptions, IndexedFrame};
pub use palette::{rgb_to_index, Rgb, ZxPalette};
pub use reduce::reduce_to_dominant_pair;
pub use scr::{decode_scr, encode_tiles, ScrTile, SCR_SIZE};
