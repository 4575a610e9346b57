//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use zx_screen::scr::{attr_address, PIXEL_BYTES};
use zx_screen::{Attribute, SCR_SIZE};

/// Assert a buffer is a well-formed screen dump
pub fn assert_scr(bytes: &[u8]) {
    assert_eq!(
        bytes.len(),
        SCR_SIZE,
        "Expected {SCR_SIZE}-byte SCR, got {} bytes",
        bytes.len()
    );
}

/// Assert the attribute byte of block `(bx, by)`
pub fn assert_attr(bytes: &[u8], bx: usize, by: usize, expected: Attribute) {
    assert_scr(bytes);
    assert_eq!(
        Attribute::from_byte(bytes[attr_address(bx, by)]),
        expected,
        "attribute of block ({bx}, {by})"
    );
}

/// Assert each listed block has the empty attribute and a blank pixel
/// plane, i.e. lies outside the source image
pub fn assert_blank_blocks(bytes: &[u8], blocks: impl IntoIterator<Item = (usize, usize)>) {
    assert_scr(bytes);
    for (bx, by) in blocks {
        assert_eq!(
            bytes[attr_address(bx, by)],
            Attribute::EMPTY.to_byte(),
            "block ({bx}, {by}) should be empty"
        );
        for dy in 0..8 {
            let addr = zx_screen::scr::pixel_address(by * 8 + dy, bx);
            assert!(addr < PIXEL_BYTES);
            assert_eq!(bytes[addr], 0, "pixel row {dy} of block ({bx}, {by})");
        }
    }
}
