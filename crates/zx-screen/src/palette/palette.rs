//! The ZX palette value and nearest-color helpers.
//!
//! Palette indices follow the hardware color order: bit 0 is blue, bit 1 is
//! red, bit 2 is green. A color's brightness is not part of its index; it is
//! carried by the block attribute.

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Default intensity of a set channel in a non-bright color.
pub const DEFAULT_DIM_LEVEL: u8 = 192;

/// The base colors at full 0/255 intensity, as produced by per-channel
/// binarization. Used by the block reducer.
pub const FULL_INTENSITY: [Rgb; 8] = [
    [0, 0, 0],
    [0, 0, 255],
    [255, 0, 0],
    [255, 0, 255],
    [0, 255, 0],
    [0, 255, 255],
    [255, 255, 0],
    [255, 255, 255],
];

/// Map an RGB color to its 3-bit palette index by thresholding each channel
/// at the mid-point.
///
/// ```
/// use zx_screen::rgb_to_index;
///
/// assert_eq!(rgb_to_index([255, 0, 0]), 2);
/// assert_eq!(rgb_to_index([0, 200, 130]), 5);
/// ```
#[inline]
pub fn rgb_to_index(rgb: Rgb) -> u8 {
    let [r, g, b] = rgb;
    let r_bit = u8::from(r >= 128);
    let g_bit = u8::from(g >= 128);
    let b_bit = u8::from(b >= 128);
    (g_bit << 2) | (r_bit << 1) | b_bit
}

/// Squared Euclidean distance between two RGB colors.
#[inline]
pub fn squared_distance(a: Rgb, b: Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// One displayable color of the 15-entry palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Rendered color
    pub rgb: Rgb,
    /// 3-bit palette index
    pub index: u8,
    /// Whether this entry needs the BRIGHT attribute
    pub bright: bool,
}

/// The ZX Spectrum palette for a given dim level.
///
/// Holds the 8 dim base colors and the 15 distinct displayable colors
/// (8 dim + 7 bright; bright black is identical to black and is omitted).
/// Build a new value to change the dim level; nothing is global.
///
/// # Example
///
/// ```
/// use zx_screen::ZxPalette;
///
/// let palette = ZxPalette::new(192);
/// assert_eq!(palette.base(2), [192, 0, 0]);
/// assert_eq!(palette.bright(2), [255, 0, 0]);
/// assert_eq!(palette.full().len(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZxPalette {
    dim_level: u8,
    base: [Rgb; 8],
    full: [PaletteEntry; 15],
}

impl ZxPalette {
    /// Build the palette with `dim_level` as the intensity of set channels
    /// in non-bright colors.
    pub fn new(dim_level: u8) -> Self {
        let mut base = [[0u8; 3]; 8];
        for (index, color) in base.iter_mut().enumerate() {
            *color = FULL_INTENSITY[index].map(|v| if v == 0 { 0 } else { dim_level });
        }

        let mut full = [PaletteEntry {
            rgb: [0, 0, 0],
            index: 0,
            bright: false,
        }; 15];
        for index in 0..8 {
            full[index] = PaletteEntry {
                rgb: base[index],
                index: index as u8,
                bright: false,
            };
        }
        for index in 1..8 {
            full[7 + index] = PaletteEntry {
                rgb: FULL_INTENSITY[index],
                index: index as u8,
                bright: true,
            };
        }

        Self {
            dim_level,
            base,
            full,
        }
    }

    /// Intensity used for set channels of dim colors.
    #[inline]
    pub fn dim_level(&self) -> u8 {
        self.dim_level
    }

    /// Dim color for a 3-bit index.
    #[inline]
    pub fn base(&self, index: u8) -> Rgb {
        self.base[(index & 7) as usize]
    }

    /// Bright color for a 3-bit index. Bright black stays black.
    #[inline]
    pub fn bright(&self, index: u8) -> Rgb {
        FULL_INTENSITY[(index & 7) as usize]
    }

    /// Rendered color of `index` under the given BRIGHT flag.
    #[inline]
    pub fn color(&self, index: u8, bright: bool) -> Rgb {
        if bright {
            self.bright(index)
        } else {
            self.base(index)
        }
    }

    /// All 15 displayable colors, dim entries first.
    #[inline]
    pub fn full(&self) -> &[PaletteEntry; 15] {
        &self.full
    }

    /// Position in [`full()`](Self::full) of the entry nearest to `rgb`.
    ///
    /// Ties go to the lower position, so pure black always resolves to the
    /// dim black entry.
    pub fn nearest_full(&self, rgb: Rgb) -> usize {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (position, entry) in self.full.iter().enumerate() {
            let distance = squared_distance(entry.rgb, rgb);
            if distance < best_distance {
                best_distance = distance;
                best = position;
            }
        }
        best
    }
}

impl Default for ZxPalette {
    fn default() -> Self {
        Self::new(DEFAULT_DIM_LEVEL)
    }
}
