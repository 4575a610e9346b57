//! Ordered (matrix threshold) dithering.
//!
//! Each pixel is compared against a threshold that blends the flat 0.5
//! cut-off with the tiled matrix value:
//!
//! ```text
//! threshold = (1 - t) * 0.5 + t * matrix[y % rows][x % cols] / denom
//! ```
//!
//! so `t = 0` is a hard threshold and `t = 1` the full pattern.

/// A tiled threshold matrix.
#[derive(Debug, Clone, Copy)]
pub(super) struct OrderedMatrix {
    /// Matrix rows, all the same length.
    pub rows: &'static [&'static [u8]],
    /// Divisor normalizing matrix values into `0..1`.
    pub denom: f32,
}

impl OrderedMatrix {
    /// Threshold a channel against the tiled matrix in place.
    pub(super) fn apply(&self, channel: &mut [u8], width: usize, height: usize, t: f32) {
        let row_count = self.rows.len();
        for y in 0..height {
            let row = self.rows[y % row_count];
            let cols = row.len();
            for x in 0..width {
                let idx = y * width + x;
                let v = channel[idx] as f32 / 255.0;
                let m = row[x % cols] as f32 / self.denom;
                let threshold = (1.0 - t) * 0.5 + t * m;
                channel[idx] = if v > threshold { 255 } else { 0 };
            }
        }
    }
}

pub(super) const BAYER_2: OrderedMatrix = OrderedMatrix {
    rows: &[&[0, 2], &[3, 1]],
    denom: 4.0,
};

pub(super) const BAYER_4: OrderedMatrix = OrderedMatrix {
    rows: &[
        &[0, 8, 2, 10],
        &[12, 4, 14, 6],
        &[3, 11, 1, 9],
        &[15, 7, 13, 5],
    ],
    denom: 16.0,
};

pub(super) const BAYER_8: OrderedMatrix = OrderedMatrix {
    rows: &[
        &[0, 32, 8, 40, 2, 34, 10, 42],
        &[48, 16, 56, 24, 50, 18, 58, 26],
        &[12, 44, 4, 36, 14, 46, 6, 38],
        &[60, 28, 52, 20, 62, 30, 54, 22],
        &[3, 35, 11, 43, 1, 33, 9, 41],
        &[51, 19, 59, 27, 49, 17, 57, 25],
        &[15, 47, 7, 39, 13, 45, 5, 37],
        &[63, 31, 55, 23, 61, 29, 53, 21],
    ],
    denom: 64.0,
};

pub(super) const CLUSTERED: OrderedMatrix = OrderedMatrix {
    rows: &[&[0, 2, 3, 1], &[3, 1, 0, 2], &[2, 0, 1, 3], &[1, 3, 2, 0]],
    denom: 4.0,
};

/// Diagonal line pattern, 7 levels.
pub(super) const LINE_DIAGONAL_7: OrderedMatrix = OrderedMatrix {
    rows: &[
        &[0, 5, 3, 1, 6, 4, 2],
        &[5, 3, 1, 6, 4, 2, 0],
        &[3, 1, 6, 4, 2, 0, 5],
        &[1, 6, 4, 2, 0, 5, 3],
        &[6, 4, 2, 0, 5, 3, 1],
        &[4, 2, 0, 5, 3, 1, 6],
        &[2, 0, 5, 3, 1, 6, 4],
    ],
    denom: 7.0,
};

pub(super) const DOT_MATRIX_5: OrderedMatrix = OrderedMatrix {
    rows: &[
        &[0, 1, 2, 1, 0],
        &[1, 3, 4, 3, 1],
        &[2, 4, 5, 4, 2],
        &[1, 3, 4, 3, 1],
        &[0, 1, 2, 1, 0],
    ],
    denom: 6.0,
};

pub(super) const CHECKERBOARD: OrderedMatrix = OrderedMatrix {
    rows: &[&[0, 1], &[1, 0]],
    denom: 1.0,
};

/// Hard threshold at `t * 255`.
pub(super) fn threshold(channel: &mut [u8], t: f32) {
    let cut = t * 255.0;
    for v in channel.iter_mut() {
        *v = if *v as f32 > cut { 255 } else { 0 };
    }
}
