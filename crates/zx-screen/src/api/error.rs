//! Error types for the zx-screen crate.
//!
//! All fallible operations validate their inputs before touching any
//! buffer, so an `Err` always means the caller's data is unchanged.

use thiserror::Error;

/// Input buffer or dimension violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Width or height is not a multiple of the 8-pixel block size.
    #[error("dimensions {width}x{height} are not multiples of 8")]
    NotBlockAligned {
        /// Image width in pixels
        width: usize,
        /// Image height in pixels
        height: usize,
    },

    /// Width or height is zero.
    #[error("dimensions {width}x{height} are empty")]
    Empty {
        /// Image width in pixels
        width: usize,
        /// Image height in pixels
        height: usize,
    },

    /// A pixel buffer does not hold the number of bytes its dimensions imply.
    #[error("{what} buffer has {actual} bytes, expected {expected}")]
    BufferLength {
        /// Which buffer was rejected
        what: &'static str,
        /// Length implied by the dimensions
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// An SCR buffer is not exactly 6912 bytes long.
    #[error("SCR data must be exactly 6912 bytes, got {0}")]
    ScrLength(usize),

    /// A per-block table has the wrong number of entries.
    #[error("{what} has {actual} entries, expected {expected} blocks")]
    BlockCount {
        /// Which table was rejected
        what: &'static str,
        /// Number of 8x8 blocks in the frame
        expected: usize,
        /// Number of entries supplied
        actual: usize,
    },

    /// Two images that must be the same size are not.
    #[error("mask is {mask_width}x{mask_height}, frame is {width}x{height}")]
    MaskSize {
        /// Mask width in pixels
        mask_width: usize,
        /// Mask height in pixels
        mask_height: usize,
        /// Frame width in pixels
        width: usize,
        /// Frame height in pixels
        height: usize,
    },
}

/// Dither stage selection errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgorithmError {
    /// The algorithm key is not in the registry.
    #[error("unknown dither algorithm: {0}")]
    Unknown(String),

    /// Strength must lie in `0.0..=1.0`.
    #[error("dither strength {0} is outside 0..=1")]
    Strength(f32),
}

/// Unified error type for the zx-screen public API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    /// Buffer or dimension violation
    #[error("invalid input shape: {0}")]
    Shape(#[from] ShapeError),

    /// Dither algorithm selection error
    #[error("dither error: {0}")]
    Algorithm(#[from] AlgorithmError),
}

/// Check that `width`x`height` is non-empty and block aligned.
pub(crate) fn check_block_aligned(width: usize, height: usize) -> Result<(), ShapeError> {
    if width == 0 || height == 0 {
        return Err(ShapeError::Empty { width, height });
    }
    if width % 8 != 0 || height % 8 != 0 {
        return Err(ShapeError::NotBlockAligned { width, height });
    }
    Ok(())
}

/// Check that an RGBA buffer matches its dimensions.
pub(crate) fn check_rgba_len(
    what: &'static str,
    rgba: &[u8],
    width: usize,
    height: usize,
) -> Result<(), ShapeError> {
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(ShapeError::BufferLength {
            what,
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scr_length_message() {
        let error = ShapeError::ScrLength(100);
        assert_eq!(error.to_string(), "SCR data must be exactly 6912 bytes, got 100");
    }

    #[test]
    fn test_unknown_algorithm_names_key() {
        let error = AlgorithmError::Unknown("dot".to_string());
        assert_eq!(error.to_string(), "unknown dither algorithm: dot");
    }

    #[test]
    fn test_screen_error_from_shape() {
        let error: ScreenError = ShapeError::NotBlockAligned {
            width: 10,
            height: 8,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "invalid input shape: dimensions 10x8 are not multiples of 8"
        );
    }

    #[test]
    fn test_check_block_aligned() {
        assert!(check_block_aligned(16, 8).is_ok());
        assert_eq!(
            check_block_aligned(0, 8),
            Err(ShapeError::Empty {
                width: 0,
                height: 8
            })
        );
        assert!(matches!(
            check_block_aligned(12, 8),
            Err(ShapeError::NotBlockAligned { .. })
        ));
    }

    #[test]
    fn test_check_rgba_len() {
        assert!(check_rgba_len("image", &[0; 256], 8, 8).is_ok());
        assert_eq!(
            check_rgba_len("image", &[0; 10], 8, 8),
            Err(ShapeError::BufferLength {
                what: "image",
                expected: 256,
                actual: 10
            })
        );
    }
}
