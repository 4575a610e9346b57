//! Test images and constants.

use zxscr::rendering::{encode_rgba8, RgbaImage};

/// Base colors at full intensity, by ZX index
pub mod colors {
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const GREEN: [u8; 4] = [0, 255, 0, 255];
    pub const YELLOW: [u8; 4] = [255, 255, 0, 255];
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
    pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
}

/// Image filled with a single color
pub fn solid(width: usize, height: usize, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_raw(width, height, rgba.repeat(width * height)).unwrap()
}

/// Image split vertically: `left` for x < `split`, `right` elsewhere
pub fn split(width: usize, height: usize, split: usize, left: [u8; 4], right: [u8; 4]) -> RgbaImage {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for _y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(if x < split { &left } else { &right });
        }
    }
    RgbaImage::from_raw(width, height, pixels).unwrap()
}

/// Smooth color gradient, useful to exercise dithering
pub fn gradient(width: usize, height: usize) -> RgbaImage {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 255 / (width - 1).max(1)) as u8,
                (y * 255 / (height - 1).max(1)) as u8,
                128,
                255,
            ]);
        }
    }
    RgbaImage::from_raw(width, height, pixels).unwrap()
}

/// Write `image` as a PNG file
pub fn write_png(path: &std::path::Path, image: &RgbaImage) {
    std::fs::write(path, encode_rgba8(image).unwrap()).unwrap();
}
