use zx_screen::{
    apply_flash_attrs, compute_bright_attrs, dither_rgba_channels, encode_tiles, index,
    reduce_to_dominant_pair, saturate_full, DitherAlgorithm, IndexOptions, IndexedFrame, ScrTile,
    ZxPalette,
};

use crate::error::ConvertError;
use crate::models::{BrightMode, ConvertConfig};
use crate::rendering::RgbaImage;

/// Result of converting one image
#[derive(Debug)]
pub struct Conversion {
    /// Encoded screens, row-major
    pub tiles: Vec<ScrTile>,
    /// The frame as encoded (after ink/paper normalization)
    pub frame: IndexedFrame,
}

/// The image to SCR filter chain:
/// saturate → dither → reduce → index (+ bright, flash) → encode
#[derive(Debug, Clone)]
pub struct ZxFilter {
    algorithm: DitherAlgorithm,
    strength: f32,
    bright: BrightMode,
    palette: ZxPalette,
    prefer_dark_ink: bool,
    saturate: bool,
    max_width: usize,
    max_height: usize,
}

impl ZxFilter {
    pub fn from_config(config: &ConvertConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self {
            algorithm: config.dither_algorithm()?,
            strength: config.strength,
            bright: config.bright,
            palette: config.palette(),
            prefer_dark_ink: config.prefer_dark_ink,
            saturate: config.saturate,
            max_width: config.max_width,
            max_height: config.max_height,
        })
    }

    pub fn palette(&self) -> &ZxPalette {
        &self.palette
    }

    /// Reject images the filter cannot process.
    pub fn check_dimensions(&self, width: usize, height: usize) -> Result<(), ConvertError> {
        if width == 0
            || height == 0
            || width % 8 != 0
            || height % 8 != 0
            || width > self.max_width
            || height > self.max_height
        {
            return Err(ConvertError::UnsupportedDimensions {
                width,
                height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        Ok(())
    }

    /// Apply the color stages in place: saturation, dithering and
    /// dominant-pair reduction. Afterwards every block holds at most two
    /// base colors.
    pub fn filter(&self, rgba: &mut [u8], width: usize, height: usize) -> Result<(), ConvertError> {
        self.check_dimensions(width, height)?;
        if self.saturate {
            saturate_full(rgba);
        }
        dither_rgba_channels(rgba, width, height, self.algorithm, self.strength)?;
        reduce_to_dominant_pair(rgba, width, height)?;
        Ok(())
    }

    /// Convert an image, with an optional flash mask of the same size, into
    /// SCR tiles.
    pub fn convert(
        &self,
        image: &RgbaImage,
        flash: Option<&RgbaImage>,
    ) -> Result<Conversion, ConvertError> {
        let (width, height) = (image.width, image.height);
        self.check_dimensions(width, height)?;
        if let Some(mask) = flash {
            if mask.width != width || mask.height != height {
                return Err(ConvertError::FlashMaskSize {
                    mask_width: mask.width,
                    mask_height: mask.height,
                    width,
                    height,
                });
            }
        }

        let mut rgba = image.pixels.clone();
        if self.saturate {
            saturate_full(&mut rgba);
        }

        // Bright bits come from the source colors, before dithering
        let options = match self.bright {
            BrightMode::On => IndexOptions::new().bright(true),
            BrightMode::Off => IndexOptions::new(),
            BrightMode::Auto => IndexOptions::new().bright_bits(compute_bright_attrs(
                &rgba,
                width,
                height,
                &self.palette,
            )?),
        };

        dither_rgba_channels(&mut rgba, width, height, self.algorithm, self.strength)?;
        reduce_to_dominant_pair(&mut rgba, width, height)?;
        let mut frame = index(&rgba, width, height, &options)?;

        if let Some(mask) = flash {
            apply_flash_attrs(&mut frame, &mask.pixels, mask.width, mask.height)?;
        }

        let tiles = encode_tiles(&mut frame, self.prefer_dark_ink);
        tracing::info!(
            width,
            height,
            algorithm = %self.algorithm,
            bright = %self.bright,
            flash = flash.is_some(),
            tiles = tiles.len(),
            "Converted image"
        );
        Ok(Conversion { tiles, frame })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solid(width: usize, height: usize, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_raw(width, height, rgba.repeat(width * height)).unwrap()
    }

    fn filter(config: ConvertConfig) -> ZxFilter {
        ZxFilter::from_config(&config).unwrap()
    }

    #[test]
    fn test_rejects_unaligned_and_oversized() {
        let f = filter(ConvertConfig::default());
        assert!(f.check_dimensions(256, 192).is_ok());
        assert!(f.check_dimensions(512, 384).is_ok());
        assert!(matches!(
            f.check_dimensions(250, 192),
            Err(ConvertError::UnsupportedDimensions { .. })
        ));
        assert!(matches!(
            f.check_dimensions(520, 192),
            Err(ConvertError::UnsupportedDimensions { .. })
        ));
        assert!(f.check_dimensions(0, 8).is_err());
    }

    #[test]
    fn test_from_config_rejects_unknown_algorithm() {
        let config = ConvertConfig {
            algorithm: "dot".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ZxFilter::from_config(&config),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn test_filter_leaves_two_colors_per_block() {
        let f = filter(ConvertConfig::default());
        let mut rgba: Vec<u8> = (0..16 * 16)
            .flat_map(|i| [(i * 3) as u8, (i * 5 % 256) as u8, 90, 255])
            .collect();
        f.filter(&mut rgba, 16, 16).unwrap();
        for by in 0..2 {
            for bx in 0..2 {
                let mut seen = Vec::new();
                for y in by * 8..by * 8 + 8 {
                    for x in bx * 8..bx * 8 + 8 {
                        let p = (y * 16 + x) * 4;
                        let rgb = [rgba[p], rgba[p + 1], rgba[p + 2]];
                        assert!(rgb.iter().all(|&c| c == 0 || c == 255));
                        if !seen.contains(&rgb) {
                            seen.push(rgb);
                        }
                    }
                }
                assert!(seen.len() <= 2, "block ({bx}, {by}) has {seen:?}");
            }
        }
    }

    #[test]
    fn test_convert_bright_modes() {
        let image = solid(16, 8, [0, 0, 255, 255]);

        let on = filter(ConvertConfig::default()).convert(&image, None).unwrap();
        assert!(on.frame.attrs().iter().all(|a| a.bright));

        let off = filter(ConvertConfig {
            bright: BrightMode::Off,
            ..Default::default()
        })
        .convert(&image, None)
        .unwrap();
        assert!(off.frame.attrs().iter().all(|a| !a.bright));

        let dim_blue = solid(16, 8, [0, 0, 192, 255]);
        let auto = filter(ConvertConfig {
            bright: BrightMode::Auto,
            saturate: false,
            ..Default::default()
        })
        .convert(&dim_blue, None)
        .unwrap();
        assert!(auto.frame.attrs().iter().all(|a| !a.bright));
    }

    #[test]
    fn test_convert_with_flash_mask() {
        let image = solid(16, 8, [0, 0, 0, 255]);
        let mut mask = solid(16, 8, [0, 0, 0, 0]);
        for y in 0..8 {
            for x in 8..16 {
                let p = (y * 16 + x) * 4;
                mask.pixels[p..p + 4].copy_from_slice(&[255, 0, 0, 255]);
            }
        }
        let conversion = filter(ConvertConfig::default())
            .convert(&image, Some(&mask))
            .unwrap();
        let attrs = conversion.frame.attrs();
        assert!(!attrs[0].flash);
        assert!(attrs[1].flash);
        assert_eq!(attrs[1].ink, 2);
        assert_eq!(attrs[1].paper, 0);
    }

    #[test]
    fn test_convert_rejects_mismatched_mask() {
        let image = solid(16, 8, [0, 0, 0, 255]);
        let mask = solid(8, 8, [255, 0, 0, 255]);
        assert!(matches!(
            filter(ConvertConfig::default()).convert(&image, Some(&mask)),
            Err(ConvertError::FlashMaskSize { .. })
        ));
    }

    #[test]
    fn test_convert_large_image_tiles() {
        let image = solid(512, 384, [255, 255, 0, 255]);
        let conversion = filter(ConvertConfig::default())
            .convert(&image, None)
            .unwrap();
        assert_eq!(conversion.tiles.len(), 4);
        assert!(conversion.frame.satisfies_attribute_invariant());
    }
}
