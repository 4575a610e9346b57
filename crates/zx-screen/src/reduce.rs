//! Block reducer: limit every 8x8 block to two base colors.
//!
//! After per-channel dithering a block may hold any of the 8 full-intensity
//! colors, but the display can only show two per block. The reducer keeps
//! the two most frequent colors and snaps every other pixel to whichever of
//! them is closer.

use crate::api::{check_block_aligned, check_rgba_len, ShapeError};
use crate::indexed::BLOCK;
use crate::palette::{rgb_to_index, squared_distance, FULL_INTENSITY};

/// Reduce each 8x8 block of `rgba` to its two dominant base colors, in place.
///
/// Colors are ranked by pixel count, then by first appearance in row-major
/// order within the block. Pixels that match neither of the top two are
/// rewritten to the full-intensity color of the nearer one (the most
/// frequent wins distance ties). Alpha bytes are never touched.
///
/// # Errors
///
/// Rejects non block-aligned dimensions and a mis-sized buffer without
/// modifying it.
///
/// # Example
///
/// ```
/// use zx_screen::reduce_to_dominant_pair;
///
/// let mut rgba = [[0u8, 0, 0, 255]; 64].concat();
/// rgba[0..3].copy_from_slice(&[0, 255, 255]);
/// rgba[4..7].copy_from_slice(&[0, 0, 255]);
/// rgba[8..11].copy_from_slice(&[0, 0, 255]);
/// reduce_to_dominant_pair(&mut rgba, 8, 8).unwrap();
/// // cyan was the third color; it snaps to blue
/// assert_eq!(&rgba[0..4], &[0, 0, 255, 255]);
/// ```
pub fn reduce_to_dominant_pair(
    rgba: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), ShapeError> {
    check_block_aligned(width, height)?;
    check_rgba_len("image", rgba, width, height)?;

    let mut rewritten = 0usize;
    for by in (0..height).step_by(BLOCK) {
        for bx in (0..width).step_by(BLOCK) {
            rewritten += reduce_block(rgba, width, bx, by);
        }
    }

    tracing::trace!(rewritten, "Reduced blocks to dominant pairs");
    Ok(())
}

/// Reduce the block with top-left corner `(x0, y0)`. Returns the number of
/// rewritten pixels.
fn reduce_block(rgba: &mut [u8], width: usize, x0: usize, y0: usize) -> usize {
    let mut indices = [0u8; BLOCK * BLOCK];
    let mut counts = [0u32; 8];
    let mut first_seen = [usize::MAX; 8];

    for dy in 0..BLOCK {
        for dx in 0..BLOCK {
            let p = ((y0 + dy) * width + x0 + dx) * 4;
            let idx = rgb_to_index([rgba[p], rgba[p + 1], rgba[p + 2]]);
            let slot = dy * BLOCK + dx;
            indices[slot] = idx;
            counts[idx as usize] += 1;
            if first_seen[idx as usize] == usize::MAX {
                first_seen[idx as usize] = slot;
            }
        }
    }

    let mut present: Vec<usize> = (0..8).filter(|&i| counts[i] > 0).collect();
    if present.len() <= 2 {
        return 0;
    }
    present.sort_by(|&a, &b| counts[b].cmp(&counts[a]).then(first_seen[a].cmp(&first_seen[b])));

    let a = present[0] as u8;
    let b = present[1] as u8;
    let color_a = FULL_INTENSITY[a as usize];
    let color_b = FULL_INTENSITY[b as usize];

    let mut rewritten = 0;
    for (slot, &idx) in indices.iter().enumerate() {
        if idx == a || idx == b {
            continue;
        }
        let p = ((y0 + slot / BLOCK) * width + x0 + slot % BLOCK) * 4;
        let rgb = [rgba[p], rgba[p + 1], rgba[p + 2]];
        let target = if squared_distance(rgb, color_a) <= squared_distance(rgb, color_b) {
            color_a
        } else {
            color_b
        };
        rgba[p..p + 3].copy_from_slice(&target);
        rewritten += 1;
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block_of(rgb: [u8; 3], width: usize, height: usize) -> Vec<u8> {
        [rgb[0], rgb[1], rgb[2], 255].repeat(width * height)
    }

    fn put(rgba: &mut [u8], width: usize, x: usize, y: usize, rgb: [u8; 3]) {
        let p = (y * width + x) * 4;
        rgba[p..p + 3].copy_from_slice(&rgb);
    }

    fn distinct_indices(rgba: &[u8], width: usize, bx: usize, by: usize) -> Vec<u8> {
        let mut seen = Vec::new();
        for y in by * 8..by * 8 + 8 {
            for x in bx * 8..bx * 8 + 8 {
                let p = (y * width + x) * 4;
                let idx = rgb_to_index([rgba[p], rgba[p + 1], rgba[p + 2]]);
                if !seen.contains(&idx) {
                    seen.push(idx);
                }
            }
        }
        seen.sort_unstable();
        seen
    }

    #[test]
    fn test_two_color_block_untouched() {
        let mut rgba = block_of([0, 0, 0], 8, 8);
        put(&mut rgba, 8, 3, 3, [255, 255, 255]);
        let before = rgba.clone();
        reduce_to_dominant_pair(&mut rgba, 8, 8).unwrap();
        assert_eq!(rgba, before);
    }

    #[test]
    fn test_three_colors_reduce_to_two() {
        // 40 black, 20 white, 4 red
        let mut rgba = block_of([0, 0, 0], 8, 8);
        for i in 0..20 {
            put(&mut rgba, 8, i % 8, i / 8, [255, 255, 255]);
        }
        for i in 60..64 {
            put(&mut rgba, 8, i % 8, i / 8, [255, 0, 0]);
        }
        reduce_to_dominant_pair(&mut rgba, 8, 8).unwrap();
        assert_eq!(distinct_indices(&rgba, 8, 0, 0), vec![0, 7]);
        // red is nearer black than white
        assert_eq!(&rgba[63 * 4..64 * 4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_first_seen_breaks_count_ties() {
        // green and blue both 8 pixels, green appears first; black dominant
        let mut rgba = block_of([0, 0, 0], 8, 8);
        for x in 0..8 {
            put(&mut rgba, 8, x, 1, [0, 255, 0]);
            put(&mut rgba, 8, x, 2, [0, 0, 255]);
        }
        reduce_to_dominant_pair(&mut rgba, 8, 8).unwrap();
        assert_eq!(distinct_indices(&rgba, 8, 0, 0), vec![0, 4]);
    }

    #[test]
    fn test_alpha_preserved() {
        let mut rgba = block_of([0, 0, 0], 8, 8);
        for i in 0..10 {
            put(&mut rgba, 8, i, 0, [255, 255, 255]);
        }
        put(&mut rgba, 8, 7, 7, [255, 0, 255]);
        rgba[63 * 4 + 3] = 17;
        reduce_to_dominant_pair(&mut rgba, 8, 8).unwrap();
        assert_eq!(rgba[63 * 4 + 3], 17);
        assert_eq!(&rgba[63 * 4..63 * 4 + 3], &[255, 255, 255]);
    }

    #[test]
    fn test_blocks_reduced_independently() {
        let mut rgba = block_of([0, 0, 0], 16, 8);
        for y in 0..8 {
            put(&mut rgba, 16, 8, y, [255, 0, 0]);
            put(&mut rgba, 16, 9, y, [0, 255, 0]);
        }
        put(&mut rgba, 16, 0, 0, [0, 0, 255]);
        reduce_to_dominant_pair(&mut rgba, 16, 8).unwrap();
        assert_eq!(distinct_indices(&rgba, 16, 0, 0), vec![0, 1]);
        assert_eq!(distinct_indices(&rgba, 16, 1, 0).len(), 2);
    }

    #[test]
    fn test_rejects_unaligned() {
        let mut rgba = block_of([0, 0, 0], 10, 8);
        assert!(matches!(
            reduce_to_dominant_pair(&mut rgba, 10, 8),
            Err(ShapeError::NotBlockAligned { .. })
        ));
    }
}
