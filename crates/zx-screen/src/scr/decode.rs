use super::layout::{attr_address, pixel_address};
use super::{SCREEN_COLS, SCREEN_HEIGHT, SCREEN_ROWS, SCREEN_WIDTH, SCR_SIZE};
use crate::api::ShapeError;
use crate::indexed::{Attribute, IndexedFrame, BLOCK};

/// Decode a 6912-byte SCR buffer into a 256x192 frame.
///
/// Set bits become the block's ink, clear bits its paper.
///
/// # Errors
///
/// [`ShapeError::ScrLength`] if `bytes` is not exactly 6912 bytes long.
///
/// # Example
///
/// ```
/// use zx_screen::decode_scr;
///
/// let mut scr = vec![0u8; 6912];
/// scr[0] = 0x80;
/// scr[6144] = (2 << 3) | 6; // paper 2, ink 6
/// let frame = decode_scr(&scr).unwrap();
/// assert_eq!(frame.pixel(0, 0), 6);
/// assert_eq!(frame.pixel(1, 0), 2);
/// ```
pub fn decode_scr(bytes: &[u8]) -> Result<IndexedFrame, ShapeError> {
    if bytes.len() != SCR_SIZE {
        return Err(ShapeError::ScrLength(bytes.len()));
    }

    let mut attrs = Vec::with_capacity(SCREEN_COLS * SCREEN_ROWS);
    for by in 0..SCREEN_ROWS {
        for bx in 0..SCREEN_COLS {
            attrs.push(Attribute::from_byte(bytes[attr_address(bx, by)]));
        }
    }

    let mut pixels = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT];
    for y in 0..SCREEN_HEIGHT {
        let row = &mut pixels[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH];
        for bx in 0..SCREEN_COLS {
            let byte = bytes[pixel_address(y, bx)];
            let attr = attrs[(y / BLOCK) * SCREEN_COLS + bx];
            for bit in 0..BLOCK {
                row[bx * BLOCK + bit] = if byte & (0x80 >> bit) != 0 {
                    attr.ink
                } else {
                    attr.paper
                };
            }
        }
    }

    IndexedFrame::new(pixels, attrs, SCREEN_WIDTH, SCREEN_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scr::PIXEL_BYTES;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(decode_scr(&[0; 6911]), Err(ShapeError::ScrLength(6911)));
        assert_eq!(decode_scr(&[]), Err(ShapeError::ScrLength(0)));
    }

    #[test]
    fn test_blank_screen_is_paper() {
        let mut scr = vec![0u8; SCR_SIZE];
        scr[PIXEL_BYTES..].fill(Attribute::EMPTY.to_byte());
        let frame = decode_scr(&scr).unwrap();
        assert_eq!((frame.width(), frame.height()), (256, 192));
        assert!(frame.pixels().iter().all(|&p| p == 0));
        assert!(frame.attrs().iter().all(|&a| a == Attribute::EMPTY));
    }

    #[test]
    fn test_interleaved_rows() {
        let mut scr = vec![0u8; SCR_SIZE];
        scr[PIXEL_BYTES..].fill(Attribute::new(1, 0, false, false).to_byte());
        // second pixel line of the top third lives 256 bytes in
        scr[0x100] = 0xFF;
        let frame = decode_scr(&scr).unwrap();
        assert_eq!(frame.pixel(0, 0), 0);
        assert_eq!(frame.pixel(0, 1), 1);
        assert_eq!(frame.pixel(7, 1), 1);
        assert_eq!(frame.pixel(8, 1), 0);
    }

    #[test]
    fn test_attribute_flags_decoded() {
        let mut scr = vec![0u8; SCR_SIZE];
        scr[PIXEL_BYTES + 33] = 0xC0 | (3 << 3) | 5;
        let frame = decode_scr(&scr).unwrap();
        assert_eq!(frame.attr(1, 1), Attribute::new(5, 3, true, true));
        assert_eq!(frame.pixel(8, 8), 3);
    }
}
