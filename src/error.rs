use std::path::PathBuf;

use thiserror::Error;
use zx_screen::{ScreenError, ShapeError};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unsupported dimensions: {width}x{height} (must be multiples of 8, at most {max_width}x{max_height})")]
    UnsupportedDimensions {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },

    #[error("Flash mask is {mask_width}x{mask_height}, image is {width}x{height}")]
    FlashMaskSize {
        mask_width: usize,
        mask_height: usize,
        width: usize,
        height: usize,
    },

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Screen error: {0}")]
    Screen(#[from] ScreenError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ShapeError> for ConvertError {
    fn from(e: ShapeError) -> Self {
        ConvertError::Screen(e.into())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}
