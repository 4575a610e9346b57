//! Attribute records and the indexed frame container.

use crate::api::ShapeError;
use crate::palette::ZxPalette;

/// Pixels per block edge.
pub const BLOCK: usize = 8;

/// Attribute of one 8x8 block.
///
/// Packs into the hardware byte layout `FLASH(1) BRIGHT(1) PAPER(3) INK(3)`.
///
/// ```
/// use zx_screen::Attribute;
///
/// let attr = Attribute::new(4, 1, true, false);
/// assert_eq!(attr.to_byte(), 0b0100_1100);
/// assert_eq!(Attribute::from_byte(0b0100_1100), attr);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Foreground index (pixel bit 1)
    pub ink: u8,
    /// Background index (pixel bit 0)
    pub paper: u8,
    /// Saturated color variant
    pub bright: bool,
    /// Periodic ink/paper swap on hardware
    pub flash: bool,
}

impl Attribute {
    /// Attribute written for screen blocks with no image content:
    /// white ink on black paper, no bright, no flash.
    pub const EMPTY: Attribute = Attribute {
        ink: 7,
        paper: 0,
        bright: false,
        flash: false,
    };

    /// Build an attribute; indices are masked to 3 bits.
    #[inline]
    pub fn new(ink: u8, paper: u8, bright: bool, flash: bool) -> Self {
        Self {
            ink: ink & 7,
            paper: paper & 7,
            bright,
            flash,
        }
    }

    /// A block showing a single color (`ink == paper`).
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.ink == self.paper
    }

    /// Pack into the attribute byte.
    #[inline]
    pub fn to_byte(&self) -> u8 {
        (u8::from(self.flash) << 7)
            | (u8::from(self.bright) << 6)
            | ((self.paper & 7) << 3)
            | (self.ink & 7)
    }

    /// Unpack an attribute byte.
    #[inline]
    pub fn from_byte(byte: u8) -> Self {
        Self {
            ink: byte & 7,
            paper: (byte >> 3) & 7,
            bright: byte & 0x40 != 0,
            flash: byte & 0x80 != 0,
        }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Palette indices plus per-block attributes for one image.
///
/// Blocks are stored row-major. Width and height need not be multiples of
/// 8 here: the SCR encoder accepts partial edge blocks, covering them with
/// `ceil(width / 8) x ceil(height / 8)` attributes. The indexer only ever
/// produces block-aligned frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFrame {
    pub(crate) pixels: Vec<u8>,
    pub(crate) attrs: Vec<Attribute>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl IndexedFrame {
    /// Assemble a frame from its parts.
    ///
    /// # Errors
    ///
    /// - [`ShapeError::Empty`] for a zero dimension
    /// - [`ShapeError::BufferLength`] if `pixels.len() != width * height`
    /// - [`ShapeError::BlockCount`] if `attrs` does not have one entry per block
    pub fn new(
        pixels: Vec<u8>,
        attrs: Vec<Attribute>,
        width: usize,
        height: usize,
    ) -> Result<Self, ShapeError> {
        if width == 0 || height == 0 {
            return Err(ShapeError::Empty { width, height });
        }
        if pixels.len() != width * height {
            return Err(ShapeError::BufferLength {
                what: "pixel index",
                expected: width * height,
                actual: pixels.len(),
            });
        }
        let blocks = width.div_ceil(BLOCK) * height.div_ceil(BLOCK);
        if attrs.len() != blocks {
            return Err(ShapeError::BlockCount {
                what: "attribute table",
                expected: blocks,
                actual: attrs.len(),
            });
        }
        Ok(Self {
            pixels,
            attrs,
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of block columns (partial blocks included).
    #[inline]
    pub fn block_cols(&self) -> usize {
        self.width.div_ceil(BLOCK)
    }

    /// Number of block rows (partial blocks included).
    #[inline]
    pub fn block_rows(&self) -> usize {
        self.height.div_ceil(BLOCK)
    }

    /// Palette indices, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Block attributes, row-major.
    #[inline]
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Palette index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the frame.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x]
    }

    /// Attribute of block `(bx, by)`.
    ///
    /// # Panics
    ///
    /// Panics if the block lies outside the frame's block grid.
    #[inline]
    pub fn attr(&self, bx: usize, by: usize) -> Attribute {
        let cols = self.block_cols();
        assert!(
            bx < cols && by < self.block_rows(),
            "block ({bx}, {by}) outside {cols}x{} grid",
            self.block_rows()
        );
        self.attrs[by * cols + bx]
    }

    /// Attribute governing pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the frame.
    #[inline]
    pub fn attr_at(&self, x: usize, y: usize) -> Attribute {
        self.attr(x / BLOCK, y / BLOCK)
    }

    /// Split into `(pixels, attrs, width, height)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<Attribute>, usize, usize) {
        (self.pixels, self.attrs, self.width, self.height)
    }

    /// Whether the image is predominantly dark: the mean palette index is
    /// below half the maximum index (3.5).
    pub fn is_dark(&self) -> bool {
        let sum: u64 = self.pixels.iter().map(|&p| p as u64).sum();
        sum * 2 < self.pixels.len() as u64 * 7
    }

    /// Whether every pixel equals its block's ink or paper.
    pub fn satisfies_attribute_invariant(&self) -> bool {
        (0..self.height).all(|y| {
            (0..self.width).all(|x| {
                let attr = self.attr_at(x, y);
                let p = self.pixel(x, y);
                p == attr.ink || p == attr.paper
            })
        })
    }

    /// Render to opaque RGBA with `palette`, honoring each block's BRIGHT.
    ///
    /// With `flash_phase` set, flashing blocks show ink and paper swapped,
    /// i.e. the second half of the hardware flash cycle.
    pub fn to_rgba(&self, palette: &ZxPalette, flash_phase: bool) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.width * self.height * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                let (index, bright) = self.shown_color(x, y, flash_phase);
                let [r, g, b] = palette.color(index, bright);
                rgba.extend_from_slice(&[r, g, b, 255]);
            }
        }
        rgba
    }

    /// Palette index and BRIGHT flag displayed at `(x, y)` in the given
    /// flash phase.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the frame.
    pub fn shown_color(&self, x: usize, y: usize, flash_phase: bool) -> (u8, bool) {
        let attr = self.attr_at(x, y);
        let index = self.pixel(x, y);
        if !(flash_phase && attr.flash) {
            return (index, attr.bright);
        }
        let swapped = if index == attr.ink {
            attr.paper
        } else if index == attr.paper {
            attr.ink
        } else {
            index
        };
        (swapped, attr.bright)
    }
}
