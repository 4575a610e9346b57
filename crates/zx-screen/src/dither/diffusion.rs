//! Error diffusion on a single channel.
//!
//! Each pixel (plus the error it has accumulated) is cut at 127 to 0 or 255,
//! and the quantization error is pushed to unprocessed neighbors through a
//! kernel. Kernel weights are scaled by the strength `t`, so `t = 0` reduces
//! to a plain mid-point threshold.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`; a neighbor receives
/// `error * weight / divisor * t`. `dy` is never negative.
#[derive(Debug, Clone, Copy)]
pub(super) struct Kernel {
    /// (dx, dy, weight) entries.
    pub entries: &'static [(i32, usize, u8)],
    /// Weight divisor.
    pub divisor: f32,
    /// Largest `dy` in `entries`; the error window holds `max_dy + 1` rows.
    pub max_dy: usize,
    /// Alternate scan direction per row, mirroring `dx` on odd rows.
    pub serpentine: bool,
}

/// ```text
///        X   7
///    3   5   1
/// ```
pub(super) const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16.0,
    max_dy: 1,
    serpentine: true,
};

/// 75% propagation; strength is boosted by 1.5 at dispatch.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub(super) const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8.0,
    max_dy: 2,
    serpentine: true,
};

/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub(super) const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48.0,
    max_dy: 2,
    serpentine: false,
};

/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub(super) const SIERRA_3: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32.0,
    max_dy: 2,
    serpentine: false,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1
/// ```
pub(super) const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42.0,
    max_dy: 2,
    serpentine: false,
};

/// ```text
///            X   8   4
///    2   4   8   4   2
/// ```
pub(super) const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32.0,
    max_dy: 1,
    serpentine: false,
};

/// Sliding window of accumulated error rows.
///
/// `rows[0]` is the row being processed; `advance_row()` rotates the window
/// and clears the row that falls off the bottom.
#[derive(Debug)]
struct ErrorRows {
    rows: Vec<Vec<f32>>,
    width: usize,
}

impl ErrorRows {
    fn new(width: usize, depth: usize) -> Self {
        Self {
            rows: (0..depth).map(|_| vec![0.0; width]).collect(),
            width,
        }
    }

    #[inline]
    fn accumulated(&self, x: usize) -> f32 {
        self.rows[0][x]
    }

    /// Out-of-bounds targets are dropped.
    #[inline]
    fn add(&mut self, x: i64, dy: usize, error: f32) {
        if x >= 0 && (x as usize) < self.width && dy < self.rows.len() {
            self.rows[dy][x as usize] += error;
        }
    }

    fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(0.0);
        }
    }
}

/// Error-diffuse one channel in place with `kernel` at strength `t`.
pub(super) fn diffuse(channel: &mut [u8], width: usize, height: usize, kernel: &Kernel, t: f32) {
    if width == 0 {
        return;
    }
    let mut errors = ErrorRows::new(width, kernel.max_dy + 1);

    for y in 0..height {
        let reverse = kernel.serpentine && y % 2 == 1;
        for step in 0..width {
            let x = if reverse { width - 1 - step } else { step };
            let idx = y * width + x;
            let value = channel[idx] as f32 + errors.accumulated(x);
            let quantized: u8 = if value > 127.0 { 255 } else { 0 };
            let error = value - quantized as f32;
            channel[idx] = quantized;

            for &(dx, dy, weight) in kernel.entries {
                let dx = if reverse { -dx } else { dx };
                let share = error * weight as f32 / kernel.divisor * t;
                errors.add(x as i64 + dx as i64, dy, share);
            }
        }
        errors.advance_row();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_ratio(channel: &[u8]) -> f64 {
        channel.iter().filter(|&&v| v == 255).count() as f64 / channel.len() as f64
    }

    #[test]
    fn test_zero_strength_is_plain_threshold() {
        let mut channel: Vec<u8> = (0..=255).collect();
        diffuse(&mut channel, 16, 16, &FLOYD_STEINBERG, 0.0);
        for (v, out) in (0..=255u8).zip(channel) {
            assert_eq!(out, if v > 127 { 255 } else { 0 });
        }
    }

    #[test]
    fn test_full_propagation_preserves_mean() {
        for kernel in [FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, SIERRA_3, STUCKI, BURKES] {
            let mut channel = vec![64u8; 32 * 32];
            diffuse(&mut channel, 32, 32, &kernel, 1.0);
            let ratio = lit_ratio(&channel);
            assert!(
                (ratio - 0.25).abs() < 0.06,
                "kernel with divisor {} lit {ratio:.3} of a 25% grey",
                kernel.divisor
            );
        }
    }

    #[test]
    fn test_weights_sum_to_divisor() {
        for kernel in [FLOYD_STEINBERG, JARVIS_JUDICE_NINKE, SIERRA_3, STUCKI, BURKES] {
            let sum: u32 = kernel.entries.iter().map(|e| e.2 as u32).sum();
            assert_eq!(sum as f32, kernel.divisor);
        }
        let atkinson: u32 = ATKINSON.entries.iter().map(|e| e.2 as u32).sum();
        assert_eq!(atkinson, 6);
    }

    #[test]
    fn test_max_dy_matches_entries() {
        for kernel in [
            FLOYD_STEINBERG,
            ATKINSON,
            JARVIS_JUDICE_NINKE,
            SIERRA_3,
            STUCKI,
            BURKES,
        ] {
            let max = kernel.entries.iter().map(|e| e.1).max().unwrap();
            assert_eq!(max, kernel.max_dy);
        }
    }

    #[test]
    fn test_single_column_does_not_panic() {
        let mut channel = vec![100u8; 8];
        diffuse(&mut channel, 1, 8, &ATKINSON, 1.0);
        assert!(channel.iter().all(|&v| v == 0 || v == 255));
    }
}
