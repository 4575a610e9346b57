//! HSL conversion and full-saturation preprocessing.
//!
//! Pushing saturation to 1.0 before per-channel dithering makes every
//! channel land closer to 0 or 255, which the 8-color palette can express.

use crate::palette::Rgb;

/// Convert 8-bit RGB to HSL with every component in `0.0..=1.0`.
pub fn rgb_to_hsl(rgb: Rgb) -> [f64; 3] {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let mut h = 0.0;
    if d != 0.0 {
        h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
    }

    let l = (max + min) / 2.0;
    let s = if d != 0.0 {
        d / (1.0 - (2.0 * l - 1.0).abs())
    } else {
        0.0
    };

    [h, s, l]
}

/// Convert HSL (components in `0.0..=1.0`) back to 8-bit RGB.
pub fn hsl_to_rgb(hsl: [f64; 3]) -> Rgb {
    let [h, s, l] = hsl;
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let channel = |t: f64| -> u8 {
        let mut t = t;
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    [
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    ]
}

/// Force every pixel of an RGBA buffer to full saturation, keeping hue and
/// lightness. Alpha is untouched. The buffer is overwritten.
pub fn saturate_full(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let [h, _, l] = rgb_to_hsl([px[0], px[1], px[2]]);
        let [r, g, b] = hsl_to_rgb([h, 1.0, l]);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_samples() {
        let samples: [Rgb; 4] = [[0, 0, 0], [255, 255, 255], [255, 0, 0], [123, 45, 67]];
        for rgb in samples {
            assert_eq!(hsl_to_rgb(rgb_to_hsl(rgb)), rgb, "round trip of {rgb:?}");
        }
    }

    #[test]
    fn test_pure_red_hsl() {
        let [h, s, l] = rgb_to_hsl([255, 0, 0]);
        assert!(h.abs() < 1e-9);
        assert!((s - 1.0).abs() < 1e-9);
        assert!((l - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_saturate_full_keeps_greys_and_alpha() {
        let mut rgba = vec![128, 128, 128, 10, 0, 0, 0, 255];
        saturate_full(&mut rgba);
        assert_eq!(rgba[3], 10);
        assert_eq!(&rgba[4..8], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_saturate_full_pushes_muted_color() {
        let mut rgba = vec![150, 100, 100, 255];
        saturate_full(&mut rgba);
        assert_eq!(rgba[0], 250);
        assert!(rgba[1] <= 1 && rgba[2] <= 1);
    }
}
