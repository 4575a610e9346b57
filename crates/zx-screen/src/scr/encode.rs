//! Frame to SCR conversion with tiling.

use super::fill::{compute_fill_bytes, FILL_PAPER};
use super::layout::{attr_address, pixel_address};
use super::{PIXEL_BYTES, SCREEN_COLS, SCREEN_HEIGHT, SCREEN_ROWS, SCREEN_WIDTH, SCR_SIZE};
use crate::api::ShapeError;
use crate::indexed::{Attribute, IndexedFrame, BLOCK};

/// One encoded 256x192 screen of a possibly larger frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrTile {
    /// Tile column, counted in whole screens from the left.
    pub tx: usize,
    /// Tile row, counted in whole screens from the top.
    pub ty: usize,
    /// The 6912-byte screen dump.
    pub bytes: Box<[u8; SCR_SIZE]>,
}

/// Number of tile columns and rows needed to cover `width` x `height`.
///
/// ```
/// use zx_screen::scr::tile_grid;
///
/// assert_eq!(tile_grid(256, 192), (1, 1));
/// assert_eq!(tile_grid(300, 200), (2, 2));
/// ```
#[inline]
pub fn tile_grid(width: usize, height: usize) -> (usize, usize) {
    (width.div_ceil(SCREEN_WIDTH), height.div_ceil(SCREEN_HEIGHT))
}

/// Encode a frame to one SCR buffer per 256x192 tile, row-major.
///
/// The frame is normalized in place first and should be treated as consumed:
///
/// - if every block is uniform, each block's ink becomes the complement
///   `7 - paper` and all its pixels become paper, so the attribute bytes
///   still carry two distinct colors
/// - ink and paper of non-uniform blocks are ordered by `prefer_dark_ink`
///   and uniform blocks get their fill bytes (see [`compute_fill_bytes`])
///
/// Decoding the tiles of the normalized frame reproduces its pixels and
/// attributes exactly.
pub fn encode_tiles(frame: &mut IndexedFrame, prefer_dark_ink: bool) -> Vec<ScrTile> {
    // A complemented frame is all paper: no ink/paper reordering, zero fill
    let fill = if frame.attrs.iter().all(Attribute::is_uniform) {
        complement_uniform_frame(frame);
        vec![FILL_PAPER; frame.attrs.len()]
    } else {
        compute_fill_bytes(frame, prefer_dark_ink)
    };
    let (tiles_x, tiles_y) = tile_grid(frame.width, frame.height);
    let mut tiles = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            tiles.push(ScrTile {
                tx,
                ty,
                bytes: render_tile(frame, &fill, tx, ty),
            });
        }
    }

    tracing::debug!(
        width = frame.width,
        height = frame.height,
        tiles = tiles.len(),
        "Encoded SCR tiles"
    );
    tiles
}

/// Encode tile `(tx, ty)` of an already normalized frame.
///
/// `fill` holds one byte per block, as returned by [`compute_fill_bytes`].
/// Blocks outside the frame keep the empty attribute (white ink on black
/// paper) and a zero pixel byte.
///
/// # Errors
///
/// [`ShapeError::BlockCount`] if `fill` does not have one entry per block.
pub fn encode_tile(
    frame: &IndexedFrame,
    fill: &[u8],
    tx: usize,
    ty: usize,
) -> Result<Box<[u8; SCR_SIZE]>, ShapeError> {
    let blocks = frame.attrs.len();
    if fill.len() != blocks {
        return Err(ShapeError::BlockCount {
            what: "fill table",
            expected: blocks,
            actual: fill.len(),
        });
    }
    Ok(render_tile(frame, fill, tx, ty))
}

fn complement_uniform_frame(frame: &mut IndexedFrame) {
    let cols = frame.block_cols();
    for (block, attr) in frame.attrs.iter_mut().enumerate() {
        attr.ink = (7 - attr.paper) & 7;
        let x0 = (block % cols) * BLOCK;
        let y0 = (block / cols) * BLOCK;
        for y in y0..(y0 + BLOCK).min(frame.height) {
            let row = y * frame.width;
            for x in x0..(x0 + BLOCK).min(frame.width) {
                frame.pixels[row + x] = attr.paper;
            }
        }
    }
    tracing::debug!(blocks = frame.attrs.len(), "Complemented uniform frame");
}

fn render_tile(frame: &IndexedFrame, fill: &[u8], tx: usize, ty: usize) -> Box<[u8; SCR_SIZE]> {
    let mut scr = Box::new([0u8; SCR_SIZE]);
    scr[PIXEL_BYTES..].fill(Attribute::EMPTY.to_byte());

    let frame_cols = frame.block_cols();
    let start_bx = tx * SCREEN_COLS;
    let start_by = ty * SCREEN_ROWS;
    let cols = SCREEN_COLS.min(frame_cols.saturating_sub(start_bx));
    let rows = SCREEN_ROWS.min(frame.block_rows().saturating_sub(start_by));

    for by in 0..rows {
        for bx in 0..cols {
            let block = (start_by + by) * frame_cols + start_bx + bx;
            let attr = frame.attrs[block];

            for dy in 0..BLOCK {
                let y = by * BLOCK + dy;
                let addr = pixel_address(y, bx);
                if attr.is_uniform() {
                    scr[addr] = fill[block];
                    continue;
                }

                let gy = (start_by + by) * BLOCK + dy;
                let mut byte = 0u8;
                for bit in 0..BLOCK {
                    let gx = (start_bx + bx) * BLOCK + bit;
                    let index = if gx < frame.width && gy < frame.height {
                        frame.pixel(gx, gy)
                    } else {
                        0
                    };
                    if index == attr.ink {
                        byte |= 0x80 >> bit;
                    }
                }
                scr[addr] = byte;
            }
            scr[attr_address(bx, by)] = attr.to_byte();
        }
    }
    scr
}
