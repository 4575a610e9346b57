use super::{PIXEL_BYTES, SCREEN_COLS};

/// Offset of the pixel byte holding row `y`, byte column `bx`.
///
/// The screen is split into three 64-row thirds; inside a third, consecutive
/// bytes run across character rows first and pixel lines last.
///
/// ```
/// use zx_screen::scr::pixel_address;
///
/// assert_eq!(pixel_address(0, 0), 0);
/// assert_eq!(pixel_address(1, 0), 0x100);
/// assert_eq!(pixel_address(8, 0), 0x20);
/// assert_eq!(pixel_address(64, 3), 0x803);
/// ```
#[inline]
pub fn pixel_address(y: usize, bx: usize) -> usize {
    ((y & 0xC0) << 5) | ((y & 0x38) << 2) | ((y & 0x07) << 8) | bx
}

/// Offset of the attribute byte for block `(bx, by)`.
#[inline]
pub fn attr_address(bx: usize, by: usize) -> usize {
    PIXEL_BYTES + by * SCREEN_COLS + bx
}
