//! ZX Spectrum palette model
//!
//! Eight 3-bit base colors at a configurable dim intensity, plus the
//! saturated BRIGHT variants selected by the attribute byte.

mod palette;

pub use palette::{
    rgb_to_index, squared_distance, PaletteEntry, Rgb, ZxPalette, DEFAULT_DIM_LEVEL,
    FULL_INTENSITY,
};
