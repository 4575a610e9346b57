//! RGBA to indexed frame conversion, auto-bright and FLASH layer merge.

use super::frame::{Attribute, IndexedFrame, BLOCK};
use crate::api::{check_block_aligned, check_rgba_len, ShapeError};
use crate::palette::{rgb_to_index, squared_distance, Rgb, ZxPalette, FULL_INTENSITY};

/// Options for [`index`].
///
/// # Example
///
/// ```
/// use zx_screen::IndexOptions;
///
/// let options = IndexOptions::new().bright(true).flash(false);
/// assert!(options.bright);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// BRIGHT flag for every block when `bright_bits` is not set.
    pub bright: bool,

    /// FLASH flag for every block, before any FLASH layer merge.
    pub flash: bool,

    /// Per-block BRIGHT override, row-major, one entry per block.
    /// Usually the output of [`compute_bright_attrs`].
    pub bright_bits: Option<Vec<bool>>,
}

impl IndexOptions {
    /// Options with every flag off.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame-wide BRIGHT flag.
    #[inline]
    pub fn bright(mut self, bright: bool) -> Self {
        self.bright = bright;
        self
    }

    /// Set the frame-wide FLASH flag.
    #[inline]
    pub fn flash(mut self, flash: bool) -> Self {
        self.flash = flash;
        self
    }

    /// Use per-block BRIGHT flags instead of the frame-wide one.
    #[inline]
    pub fn bright_bits(mut self, bits: Vec<bool>) -> Self {
        self.bright_bits = Some(bits);
        self
    }
}

#[inline]
fn rgb_at(rgba: &[u8], width: usize, x: usize, y: usize) -> Rgb {
    let p = (y * width + x) * 4;
    [rgba[p], rgba[p + 1], rgba[p + 2]]
}

/// Indices ordered by count, most frequent first; equal counts keep the
/// lower index first.
fn rank_by_count<const N: usize>(counts: &[u32; N]) -> [usize; N] {
    let mut order = [0usize; N];
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = i;
    }
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));
    order
}

/// Convert an RGBA buffer to an [`IndexedFrame`].
///
/// Each pixel maps to its 3-bit index by mid-point thresholding. Per block,
/// the most frequent index becomes `paper` and the second most frequent
/// `ink` (`ink == paper` when only one index is present). Ties go to the
/// lower index.
///
/// Input is expected to carry at most two indices per block (see
/// [`reduce_to_dominant_pair`](crate::reduce_to_dominant_pair)). Any other
/// pixel is snapped to whichever of ink or paper is nearer in RGB, so the
/// result always satisfies the attribute invariant.
///
/// # Errors
///
/// Rejects non block-aligned dimensions, a buffer that is not
/// `width * height * 4` bytes, and `bright_bits` of the wrong length.
pub fn index(
    rgba: &[u8],
    width: usize,
    height: usize,
    options: &IndexOptions,
) -> Result<IndexedFrame, ShapeError> {
    check_block_aligned(width, height)?;
    check_rgba_len("image", rgba, width, height)?;

    let cols = width / BLOCK;
    let rows = height / BLOCK;
    if let Some(bits) = &options.bright_bits {
        if bits.len() != cols * rows {
            return Err(ShapeError::BlockCount {
                what: "bright bits",
                expected: cols * rows,
                actual: bits.len(),
            });
        }
    }

    let mut pixels = vec![0u8; width * height];
    let mut attrs = Vec::with_capacity(cols * rows);

    for by in 0..rows {
        for bx in 0..cols {
            let mut counts = [0u32; 8];
            for dy in 0..BLOCK {
                let y = by * BLOCK + dy;
                for dx in 0..BLOCK {
                    let x = bx * BLOCK + dx;
                    let idx = rgb_to_index(rgb_at(rgba, width, x, y));
                    pixels[y * width + x] = idx;
                    counts[idx as usize] += 1;
                }
            }

            let order = rank_by_count(&counts);
            let paper = order[0] as u8;
            let ink = if counts[order[1]] > 0 {
                order[1] as u8
            } else {
                paper
            };

            if counts[order[2]] > 0 {
                for dy in 0..BLOCK {
                    let y = by * BLOCK + dy;
                    for dx in 0..BLOCK {
                        let x = bx * BLOCK + dx;
                        let p = y * width + x;
                        if pixels[p] == ink || pixels[p] == paper {
                            continue;
                        }
                        let rgb = rgb_at(rgba, width, x, y);
                        let to_paper = squared_distance(rgb, FULL_INTENSITY[paper as usize]);
                        let to_ink = squared_distance(rgb, FULL_INTENSITY[ink as usize]);
                        pixels[p] = if to_paper <= to_ink { paper } else { ink };
                    }
                }
            }

            let block = by * cols + bx;
            let bright = match &options.bright_bits {
                Some(bits) => bits[block],
                None => options.bright,
            };
            attrs.push(Attribute::new(ink, paper, bright, options.flash));
        }
    }

    Ok(IndexedFrame {
        pixels,
        attrs,
        width,
        height,
    })
}

/// Derive a BRIGHT flag per block from the source colors.
///
/// Every pixel is matched to the nearest of the 15 displayable colors. For
/// each block the two most frequent entries are scored: the block is bright
/// when the bright entries' count is at least the dim entries' count, black
/// counting for neither. Blocks that are entirely black carry no brightness
/// information; they take the majority decision of the other blocks (bright
/// on a tie, dim when there are no other blocks).
///
/// # Errors
///
/// Rejects non block-aligned dimensions and a mis-sized buffer.
pub fn compute_bright_attrs(
    rgba: &[u8],
    width: usize,
    height: usize,
    palette: &ZxPalette,
) -> Result<Vec<bool>, ShapeError> {
    check_block_aligned(width, height)?;
    check_rgba_len("image", rgba, width, height)?;

    let cols = width / BLOCK;
    let rows = height / BLOCK;
    let full = palette.full();
    let mut bits = vec![false; cols * rows];
    let mut deferred = Vec::new();
    let mut bright_blocks = 0usize;
    let mut dark_blocks = 0usize;

    for by in 0..rows {
        for bx in 0..cols {
            let mut counts = [0u32; 15];
            for dy in 0..BLOCK {
                let y = by * BLOCK + dy;
                for dx in 0..BLOCK {
                    let x = bx * BLOCK + dx;
                    counts[palette.nearest_full(rgb_at(rgba, width, x, y))] += 1;
                }
            }

            let block = by * cols + bx;
            let order = rank_by_count(&counts);
            if order[0] == 0 && counts[0] as usize == BLOCK * BLOCK {
                deferred.push(block);
                continue;
            }

            let mut bright_score = 0u32;
            let mut dark_score = 0u32;
            for &position in &order[..2] {
                if position == 0 {
                    continue;
                }
                if full[position].bright {
                    bright_score += counts[position];
                } else {
                    dark_score += counts[position];
                }
            }

            let bright = bright_score >= dark_score;
            bits[block] = bright;
            if bright {
                bright_blocks += 1;
            } else {
                dark_blocks += 1;
            }
        }
    }

    let majority = bright_blocks + dark_blocks > 0 && bright_blocks >= dark_blocks;
    for block in &deferred {
        bits[*block] = majority;
    }

    tracing::debug!(
        bright_blocks,
        dark_blocks,
        black_blocks = deferred.len(),
        "Computed bright attributes"
    );
    Ok(bits)
}

/// Merge a FLASH layer into an indexed frame.
///
/// `mask` is an RGBA image the size of the frame; pixels with nonzero alpha
/// are flashing. Any block containing a flashing pixel gets `flash = true`.
/// A uniform block additionally takes the most frequent color of its
/// flashing pixels as `ink` (lowest index on ties), so the flash swaps
/// between two visible colors. Non-uniform blocks keep ink and paper.
///
/// # Errors
///
/// Rejects a mask whose size differs from the frame, before any change.
pub fn apply_flash_attrs(
    frame: &mut IndexedFrame,
    mask: &[u8],
    mask_width: usize,
    mask_height: usize,
) -> Result<(), ShapeError> {
    if mask_width != frame.width || mask_height != frame.height {
        return Err(ShapeError::MaskSize {
            mask_width,
            mask_height,
            width: frame.width,
            height: frame.height,
        });
    }
    check_rgba_len("flash mask", mask, mask_width, mask_height)?;

    let cols = frame.block_cols();
    let rows = frame.block_rows();
    let mut flashing = 0usize;

    for by in 0..rows {
        for bx in 0..cols {
            let mut counts = [0u32; 8];
            let mut any = false;
            for y in by * BLOCK..((by + 1) * BLOCK).min(frame.height) {
                for x in bx * BLOCK..((bx + 1) * BLOCK).min(frame.width) {
                    let p = (y * frame.width + x) * 4;
                    if mask[p + 3] == 0 {
                        continue;
                    }
                    any = true;
                    counts[rgb_to_index([mask[p], mask[p + 1], mask[p + 2]]) as usize] += 1;
                }
            }
            if !any {
                continue;
            }

            flashing += 1;
            let attr = &mut frame.attrs[by * cols + bx];
            attr.flash = true;
            if attr.is_uniform() {
                attr.ink = rank_by_count(&counts)[0] as u8;
            }
        }
    }

    tracing::debug!(flashing, "Applied flash layer");
    Ok(())
}
