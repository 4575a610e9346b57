//! zxscr - ZX Spectrum screen converter
//!
//! Host side of the [`zx_screen`] codec: PNG input and preview output,
//! YAML configuration, the conversion pipeline and `.scr` tile persistence.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
