//! Color conversions used ahead of the dither stage.

mod hsl;

pub use hsl::{hsl_to_rgb, rgb_to_hsl, saturate_full};
