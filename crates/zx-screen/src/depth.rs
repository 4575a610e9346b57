//! 16-bit channel conversion for hosts that work above 8 bits per channel.
//!
//! The core only processes 8-bit RGBA. Hosts with 16-bit samples scale down
//! on the way in and back up on the way out. The full-scale value differs
//! per host: Photoshop tops out at 32768, PNG at 65535.

use crate::api::ShapeError;

/// Full-scale 16-bit channel value used by Photoshop documents.
pub const PHOTOSHOP_FULL_SCALE: u16 = 32768;

/// Full-scale 16-bit channel value used by PNG files.
pub const PNG_FULL_SCALE: u16 = 65535;

#[inline]
fn scale_down(value: u16, full_scale: u16) -> u8 {
    let full = full_scale.max(1) as u32;
    let v = (value as u32 * 255 + full / 2) / full;
    v.min(255) as u8
}

#[inline]
fn scale_up(value: u8, full_scale: u16) -> u16 {
    let full = full_scale as u32;
    ((value as u32 * full + 127) / 255) as u16
}

/// Convert 16-bit RGB or RGBA samples to 8-bit RGBA.
///
/// The channel layout is inferred from `samples.len()`: three samples per
/// pixel get an opaque alpha added, four are converted as-is. Values above
/// `full_scale` saturate at 255.
///
/// ```
/// use zx_screen::depth::{to_8bit_rgba, PNG_FULL_SCALE};
///
/// let rgb16 = [0u16, 65535, 32768];
/// let rgba = to_8bit_rgba(&rgb16, 1, PNG_FULL_SCALE).unwrap();
/// assert_eq!(rgba, vec![0, 255, 128, 255]);
/// ```
pub fn to_8bit_rgba(
    samples: &[u16],
    pixel_count: usize,
    full_scale: u16,
) -> Result<Vec<u8>, ShapeError> {
    let channels = if samples.len() == pixel_count * 4 {
        4
    } else if samples.len() == pixel_count * 3 {
        3
    } else {
        return Err(ShapeError::BufferLength {
            what: "16-bit sample",
            expected: pixel_count * 4,
            actual: samples.len(),
        });
    };

    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for px in samples.chunks_exact(channels) {
        rgba.push(scale_down(px[0], full_scale));
        rgba.push(scale_down(px[1], full_scale));
        rgba.push(scale_down(px[2], full_scale));
        rgba.push(if channels == 4 {
            scale_down(px[3], full_scale)
        } else {
            255
        });
    }
    Ok(rgba)
}

/// Scale 8-bit channel values up to a 16-bit host range.
pub fn to_16bit(bytes: &[u8], full_scale: u16) -> Vec<u16> {
    bytes.iter().map(|&v| scale_up(v, full_scale)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photoshop_rgba() {
        let data = [32768u16, 16384, 0, 32768, 0, 16384, 32768, 0];
        let out = to_8bit_rgba(&data, 2, PHOTOSHOP_FULL_SCALE).unwrap();
        assert_eq!(out, vec![255, 128, 0, 255, 0, 128, 255, 0]);
    }

    #[test]
    fn test_photoshop_overrange_saturates() {
        let out = to_8bit_rgba(&[65535, 0, 0], 1, PHOTOSHOP_FULL_SCALE).unwrap();
        assert_eq!(out, vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_png_rgb_adds_alpha() {
        let data = [0u16, 65535, 32768, 65535, 0, 0];
        let out = to_8bit_rgba(&data, 2, PNG_FULL_SCALE).unwrap();
        assert_eq!(out, vec![0, 255, 128, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_rejects_bad_length() {
        let err = to_8bit_rgba(&[0u16; 5], 2, PNG_FULL_SCALE).unwrap_err();
        assert!(matches!(err, ShapeError::BufferLength { actual: 5, .. }));
    }

    #[test]
    fn test_to_16bit_endpoints() {
        assert_eq!(to_16bit(&[0, 255], PHOTOSHOP_FULL_SCALE), vec![0, 32768]);
        assert_eq!(to_16bit(&[0, 255], PNG_FULL_SCALE), vec![0, 65535]);
    }

    #[test]
    fn test_down_up_stable_for_8bit_values() {
        for v in 0..=255u8 {
            let up = to_16bit(&[v], PNG_FULL_SCALE);
            let down = to_8bit_rgba(&[up[0], up[0], up[0]], 1, PNG_FULL_SCALE).unwrap();
            assert_eq!(down[0], v);
        }
    }
}
