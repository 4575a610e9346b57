//! Bit patterns for uniform blocks.
//!
//! A block with `ink == paper` renders the same whatever its pixel byte, but
//! a byte that continues the pattern of its neighbours keeps the picture
//! coherent once the block's colors are edited. Blocks are resolved from
//! the ones with the most non-uniform neighbours outward, each one voting
//! with the edge pixels it shares with them.

use std::collections::VecDeque;

use crate::indexed::{IndexedFrame, BLOCK};

/// Fill byte for an all-ink block.
pub const FILL_INK: u8 = 0xFF;

/// Fill byte for an all-paper block.
pub const FILL_PAPER: u8 = 0x00;

const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

struct BlockGrid {
    cols: usize,
    rows: usize,
}

impl BlockGrid {
    fn neighbors(&self, block: usize) -> impl Iterator<Item = (isize, isize, usize)> + '_ {
        let bx = (block % self.cols) as isize;
        let by = (block / self.cols) as isize;
        NEIGHBORS.iter().filter_map(move |&(dx, dy)| {
            let nbx = bx + dx;
            let nby = by + dy;
            if nbx < 0 || nby < 0 || nbx >= self.cols as isize || nby >= self.rows as isize {
                return None;
            }
            Some((dx, dy, nby as usize * self.cols + nbx as usize))
        })
    }
}

/// Normalize ink/paper order and choose a pixel byte for every uniform block.
///
/// Non-uniform blocks are first reordered so that `ink` is the lower index
/// when `prefer_dark_ink` is set and the higher one otherwise. Blocks cut by
/// the right or bottom image edge are left as they are. The swap touches
/// only the attributes: pixel indices are unchanged, so the picture is too.
///
/// Returns one byte per block, row-major: [`FILL_INK`] or [`FILL_PAPER`] for
/// uniform blocks and `0` for the rest.
pub fn compute_fill_bytes(frame: &mut IndexedFrame, prefer_dark_ink: bool) -> Vec<u8> {
    let grid = BlockGrid {
        cols: frame.block_cols(),
        rows: frame.block_rows(),
    };
    let total = grid.cols * grid.rows;
    let mut fill = vec![0u8; total];
    let mut normal = vec![false; total];
    let mut uniform = Vec::new();

    for block in 0..total {
        let attr = &mut frame.attrs[block];
        if attr.is_uniform() {
            uniform.push(block);
            continue;
        }
        normal[block] = true;

        let bx = block % grid.cols;
        let by = block / grid.cols;
        let partial = (bx + 1) * BLOCK > frame.width || (by + 1) * BLOCK > frame.height;
        let swap = if prefer_dark_ink {
            attr.ink > attr.paper
        } else {
            attr.ink < attr.paper
        };
        if swap && !partial {
            std::mem::swap(&mut attr.ink, &mut attr.paper);
        }
    }

    if uniform.is_empty() {
        return fill;
    }

    let is_dark = frame.is_dark();
    let default_fill = if is_dark { FILL_PAPER } else { FILL_INK };

    let count_normal = |normal: &[bool], block: usize| {
        grid.neighbors(block).filter(|&(_, _, n)| normal[n]).count()
    };

    // Bucket per number of normal neighbours; a block is queued at most once.
    let mut queues: [VecDeque<usize>; 5] = Default::default();
    let mut queued = vec![false; total];
    let mut processed = vec![false; total];

    for &block in &uniform {
        let count = count_normal(&normal, block);
        if count > 0 {
            queues[count].push_back(block);
            queued[block] = true;
        }
    }

    let mut resolved = 0usize;
    while let Some(block) = (1..=4).rev().find_map(|level| queues[level].pop_front()) {
        queued[block] = false;
        if processed[block] {
            continue;
        }

        let (ones, zeros) = edge_votes(frame, &grid, &normal, block);
        fill[block] = match ones.cmp(&zeros) {
            std::cmp::Ordering::Greater => FILL_INK,
            std::cmp::Ordering::Less => FILL_PAPER,
            std::cmp::Ordering::Equal => default_fill,
        };
        normal[block] = true;
        processed[block] = true;
        resolved += 1;

        for (_, _, n) in grid.neighbors(block) {
            if queued[n] || processed[n] || !frame.attrs[n].is_uniform() {
                continue;
            }
            let count = count_normal(&normal, n);
            if count > 0 {
                queues[count].push_back(n);
                queued[n] = true;
            }
        }
    }

    for &block in &uniform {
        if !processed[block] {
            fill[block] = default_fill;
        }
    }

    tracing::debug!(
        uniform = uniform.len(),
        resolved,
        defaulted = uniform.len() - resolved,
        is_dark,
        "Resolved uniform block fills"
    );
    fill
}

/// Count the edge pixels of normal neighbours facing `block` that match
/// (`ones`) or do not match (`zeros`) the neighbour's ink.
fn edge_votes(
    frame: &IndexedFrame,
    grid: &BlockGrid,
    normal: &[bool],
    block: usize,
) -> (u32, u32) {
    let bx = block % grid.cols;
    let by = block / grid.cols;
    let mut ones = 0;
    let mut zeros = 0;

    for (dx, dy, n) in grid.neighbors(block) {
        if !normal[n] {
            continue;
        }
        let nbx = n % grid.cols;
        let nby = n / grid.cols;
        let ink = frame.attrs[n].ink;

        for s in 0..BLOCK {
            let (x, y) = match (dx, dy) {
                (-1, _) => (nbx * BLOCK + BLOCK - 1, by * BLOCK + s),
                (1, _) => (nbx * BLOCK, by * BLOCK + s),
                (_, -1) => (bx * BLOCK + s, nby * BLOCK + BLOCK - 1),
                _ => (bx * BLOCK + s, nby * BLOCK),
            };
            if x >= frame.width || y >= frame.height {
                continue;
            }
            if frame.pixel(x, y) == ink {
                ones += 1;
            } else {
                zeros += 1;
            }
        }
    }
    (ones, zeros)
}
