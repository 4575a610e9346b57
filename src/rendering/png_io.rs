//! PNG input and preview output.

use std::io::Cursor;
use std::path::Path;

use zx_screen::depth::{to_16bit, to_8bit_rgba, PNG_FULL_SCALE};
use zx_screen::{IndexedFrame, ShapeError, ZxPalette};

use crate::error::ConvertError;

/// An 8-bit RGBA image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// Wrap an RGBA buffer, checking its length against the dimensions.
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, ShapeError> {
        if pixels.len() != width * height * 4 {
            return Err(ShapeError::BufferLength {
                what: "image",
                expected: width * height * 4,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<RgbaImage, ConvertError> {
    let bytes = std::fs::read(path)?;
    let image = decode_png(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        "Read PNG"
    );
    Ok(image)
}

/// Decode a PNG of any color type into 8-bit RGBA.
///
/// Palette and low bit-depth images are expanded; 16-bit images are scaled
/// down with the PNG full-scale value.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, ConvertError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ConvertError::PngDecode(e.to_string()))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ConvertError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let width = info.width as usize;
    let height = info.height as usize;
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(ConvertError::PngDecode(
                "palette was not expanded".to_string(),
            ))
        }
    };

    let pixels = match info.bit_depth {
        png::BitDepth::Eight => expand_to_rgba(data, channels, u8::MAX),
        png::BitDepth::Sixteen => {
            let samples: Vec<u16> = data
                .chunks_exact(2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]))
                .collect();
            let rgba16 = expand_to_rgba(&samples, channels, u16::MAX);
            to_8bit_rgba(&rgba16, width * height, PNG_FULL_SCALE)?
        }
        other => {
            return Err(ConvertError::PngDecode(format!(
                "unsupported bit depth {other:?}"
            )))
        }
    };

    Ok(RgbaImage::from_raw(width, height, pixels)?)
}

fn expand_to_rgba<T: Copy>(samples: &[T], channels: usize, opaque: T) -> Vec<T> {
    let mut out = Vec::with_capacity(samples.len() / channels * 4);
    for px in samples.chunks_exact(channels) {
        match channels {
            1 => out.extend_from_slice(&[px[0], px[0], px[0], opaque]),
            2 => out.extend_from_slice(&[px[0], px[0], px[0], px[1]]),
            3 => out.extend_from_slice(&[px[0], px[1], px[2], opaque]),
            _ => out.extend_from_slice(&px[..4]),
        }
    }
    out
}

/// Encode an 8-bit RGBA image as PNG.
pub fn encode_rgba8(image: &RgbaImage) -> Result<Vec<u8>, ConvertError> {
    encode_png(
        image.width,
        image.height,
        png::ColorType::Rgba,
        png::BitDepth::Eight,
        None,
        &image.pixels,
    )
}

/// Encode an 8-bit RGBA buffer as a 16-bit RGBA PNG.
pub fn encode_rgba16(image: &RgbaImage) -> Result<Vec<u8>, ConvertError> {
    let data: Vec<u8> = to_16bit(&image.pixels, PNG_FULL_SCALE)
        .into_iter()
        .flat_map(u16::to_be_bytes)
        .collect();
    encode_png(
        image.width,
        image.height,
        png::ColorType::Rgba,
        png::BitDepth::Sixteen,
        None,
        &data,
    )
}

/// Render a frame as a 4-bit indexed PNG over the 15 displayable colors.
///
/// `flash_phase` selects which half of the flash cycle is shown.
pub fn encode_preview(
    frame: &IndexedFrame,
    palette: &ZxPalette,
    flash_phase: bool,
) -> Result<Vec<u8>, ConvertError> {
    let plte: Vec<u8> = palette.full().iter().flat_map(|entry| entry.rgb).collect();

    let mut positions = Vec::with_capacity(frame.width() * frame.height());
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let (index, bright) = frame.shown_color(x, y, flash_phase);
            // bright entries follow the 8 dim ones; bright black is black
            let position = if bright && index > 0 { 7 + index } else { index };
            positions.push(position);
        }
    }

    let packed = pack_nibbles(&positions, frame.width());
    let png_bytes = encode_png(
        frame.width(),
        frame.height(),
        png::ColorType::Indexed,
        png::BitDepth::Four,
        Some(&plte),
        &packed,
    )?;

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

fn encode_png(
    width: usize,
    height: usize,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, ConvertError> {
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ConvertError::PngEncode(format!(
                "image too large: {width}x{height}"
            )))
        }
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, w, h);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack 4-bit values two per byte, high nibble first, padding each row.
fn pack_nibbles(values: &[u8], width: usize) -> Vec<u8> {
    let mut packed = Vec::with_capacity(width.div_ceil(2) * values.len() / width.max(1));
    for row in values.chunks(width) {
        for pair in row.chunks(2) {
            let hi = pair[0] & 0x0F;
            let lo = pair.get(1).map_or(0, |v| v & 0x0F);
            packed.push(hi << 4 | lo);
        }
    }
    packed
}
