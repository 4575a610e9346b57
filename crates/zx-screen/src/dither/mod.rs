//! Per-channel binarization: the dither stage ahead of the block reducer.
//!
//! Every algorithm takes one channel buffer (one byte per pixel, row-major),
//! its dimensions and a strength `t` in `0..=1`, and overwrites the buffer
//! with 0 or 255 values. Running it on R, G and B independently leaves each
//! pixel at one of the 8 full-intensity base colors.
//!
//! # Algorithms
//!
//! - **Ordered**: threshold, Bayer 2/4/8, clustered, diagonal lines,
//!   dot matrix, checkerboard. Threshold moves from 0.5 at `t = 0` to the
//!   matrix value at `t = 1`.
//! - **Error diffusion**: Floyd-Steinberg, Jarvis-Judice-Ninke, Sierra-3,
//!   Stucki, Burkes, Atkinson. Kernel weights are scaled by `t`.
//! - **Noise**: seeded blue-noise style jitter and random thresholds.
//!
//! # Example
//!
//! ```
//! use zx_screen::DitherAlgorithm;
//!
//! let algorithm: DitherAlgorithm = "bayer4".parse().unwrap();
//! let mut channel = vec![100u8; 16];
//! algorithm.apply(&mut channel, 4, 4, 1.0).unwrap();
//! assert!(channel.iter().all(|&v| v == 0 || v == 255));
//! ```

mod diffusion;
mod noise;
mod ordered;

use std::fmt;
use std::str::FromStr;

use crate::api::{check_rgba_len, AlgorithmError, ScreenError, ShapeError};

use diffusion::diffuse;

/// Seed used by the noise-based algorithms when parsed from a key.
pub const DEFAULT_NOISE_SEED: u64 = 12345;

/// Dither algorithm selection.
///
/// Parsed from the registry keys listed in [`DitherAlgorithm::KEYS`];
/// noise variants carry their seed so output is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherAlgorithm {
    /// Plain threshold at `t * 255`.
    Threshold,
    /// 2x2 Bayer ordered dither.
    Bayer2,
    /// 4x4 Bayer ordered dither.
    Bayer4,
    /// 8x8 Bayer ordered dither.
    Bayer8,
    /// 4x4 clustered-dot ordered dither.
    Clustered,
    /// 7x7 diagonal line pattern.
    LineDiagonal7x7,
    /// 5x5 dot matrix pattern.
    DotMatrix5x5,
    /// Alternating 2x1 checkerboard.
    Checkerboard2x1,
    /// Floyd-Steinberg error diffusion, serpentine scan.
    FloydSteinberg,
    /// Jarvis-Judice-Ninke error diffusion.
    JarvisJudiceNinke,
    /// Sierra (three-row) error diffusion.
    Sierra3,
    /// Stucki error diffusion.
    Stucki,
    /// Burkes error diffusion.
    Burkes,
    /// Atkinson error diffusion, serpentine scan, strength boosted by 1.5.
    Atkinson,
    /// Seeded noise added to the value before a 0.5 threshold.
    BlueNoise {
        /// PRNG seed
        seed: u64,
    },
    /// Seeded random threshold per pixel.
    RandomThreshold {
        /// PRNG seed
        seed: u64,
    },
}

impl DitherAlgorithm {
    /// Registry keys accepted by [`FromStr`].
    pub const KEYS: [&'static str; 16] = [
        "thr",
        "fs",
        "jjn",
        "sierra3",
        "stucki",
        "burkes",
        "atkinson",
        "bayer",
        "bayer4",
        "bayer2",
        "bluenoise",
        "clustered",
        "random",
        "linediag7x7",
        "dotmatrix5",
        "checker2x1",
    ];

    /// Registry key for this algorithm.
    pub fn key(&self) -> &'static str {
        match self {
            DitherAlgorithm::Threshold => "thr",
            DitherAlgorithm::Bayer2 => "bayer2",
            DitherAlgorithm::Bayer4 => "bayer4",
            DitherAlgorithm::Bayer8 => "bayer",
            DitherAlgorithm::Clustered => "clustered",
            DitherAlgorithm::LineDiagonal7x7 => "linediag7x7",
            DitherAlgorithm::DotMatrix5x5 => "dotmatrix5",
            DitherAlgorithm::Checkerboard2x1 => "checker2x1",
            DitherAlgorithm::FloydSteinberg => "fs",
            DitherAlgorithm::JarvisJudiceNinke => "jjn",
            DitherAlgorithm::Sierra3 => "sierra3",
            DitherAlgorithm::Stucki => "stucki",
            DitherAlgorithm::Burkes => "burkes",
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::BlueNoise { .. } => "bluenoise",
            DitherAlgorithm::RandomThreshold { .. } => "random",
        }
    }

    /// Binarize one channel in place.
    ///
    /// # Errors
    ///
    /// Rejects a buffer whose length is not `width * height` and a
    /// strength outside `0.0..=1.0`. The buffer is untouched on error.
    pub fn apply(
        &self,
        channel: &mut [u8],
        width: usize,
        height: usize,
        strength: f32,
    ) -> Result<(), ScreenError> {
        check_strength(strength)?;
        if channel.len() != width * height {
            return Err(ShapeError::BufferLength {
                what: "channel",
                expected: width * height,
                actual: channel.len(),
            }
            .into());
        }
        self.run(channel, width, height, strength);
        Ok(())
    }

    fn run(&self, channel: &mut [u8], width: usize, height: usize, t: f32) {
        match *self {
            DitherAlgorithm::Threshold => ordered::threshold(channel, t),
            DitherAlgorithm::Bayer2 => ordered::BAYER_2.apply(channel, width, height, t),
            DitherAlgorithm::Bayer4 => ordered::BAYER_4.apply(channel, width, height, t),
            DitherAlgorithm::Bayer8 => ordered::BAYER_8.apply(channel, width, height, t),
            DitherAlgorithm::Clustered => ordered::CLUSTERED.apply(channel, width, height, t),
            DitherAlgorithm::LineDiagonal7x7 => {
                ordered::LINE_DIAGONAL_7.apply(channel, width, height, t)
            }
            DitherAlgorithm::DotMatrix5x5 => ordered::DOT_MATRIX_5.apply(channel, width, height, t),
            DitherAlgorithm::Checkerboard2x1 => {
                ordered::CHECKERBOARD.apply(channel, width, height, t * 0.6)
            }
            DitherAlgorithm::FloydSteinberg => {
                diffuse(channel, width, height, &diffusion::FLOYD_STEINBERG, t)
            }
            DitherAlgorithm::JarvisJudiceNinke => {
                diffuse(channel, width, height, &diffusion::JARVIS_JUDICE_NINKE, t)
            }
            DitherAlgorithm::Sierra3 => diffuse(channel, width, height, &diffusion::SIERRA_3, t),
            DitherAlgorithm::Stucki => diffuse(channel, width, height, &diffusion::STUCKI, t),
            DitherAlgorithm::Burkes => diffuse(channel, width, height, &diffusion::BURKES, t),
            DitherAlgorithm::Atkinson => {
                diffuse(channel, width, height, &diffusion::ATKINSON, t * 1.5)
            }
            DitherAlgorithm::BlueNoise { seed } => noise::blue_noise(channel, t, seed),
            DitherAlgorithm::RandomThreshold { seed } => noise::random_threshold(channel, t, seed),
        }
    }
}

impl FromStr for DitherAlgorithm {
    type Err = AlgorithmError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let algorithm = match key {
            "thr" => DitherAlgorithm::Threshold,
            "fs" => DitherAlgorithm::FloydSteinberg,
            "jjn" => DitherAlgorithm::JarvisJudiceNinke,
            "sierra3" => DitherAlgorithm::Sierra3,
            "stucki" => DitherAlgorithm::Stucki,
            "burkes" => DitherAlgorithm::Burkes,
            "atkinson" => DitherAlgorithm::Atkinson,
            "bayer" => DitherAlgorithm::Bayer8,
            "bayer4" => DitherAlgorithm::Bayer4,
            "bayer2" => DitherAlgorithm::Bayer2,
            "bluenoise" => DitherAlgorithm::BlueNoise {
                seed: DEFAULT_NOISE_SEED,
            },
            "clustered" => DitherAlgorithm::Clustered,
            "random" => DitherAlgorithm::RandomThreshold {
                seed: DEFAULT_NOISE_SEED,
            },
            "linediag7x7" => DitherAlgorithm::LineDiagonal7x7,
            "dotmatrix5" => DitherAlgorithm::DotMatrix5x5,
            "checker2x1" => DitherAlgorithm::Checkerboard2x1,
            other => return Err(AlgorithmError::Unknown(other.to_string())),
        };
        Ok(algorithm)
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn check_strength(strength: f32) -> Result<(), AlgorithmError> {
    if (0.0..=1.0).contains(&strength) {
        Ok(())
    } else {
        Err(AlgorithmError::Strength(strength))
    }
}

/// Dither the R, G and B channels of an RGBA buffer independently.
///
/// Alpha is left as-is. The buffer is overwritten.
///
/// # Errors
///
/// Rejects a buffer that is not `width * height * 4` bytes and a strength
/// outside `0.0..=1.0`, before any pixel is modified.
pub fn dither_rgba_channels(
    rgba: &mut [u8],
    width: usize,
    height: usize,
    algorithm: DitherAlgorithm,
    strength: f32,
) -> Result<(), ScreenError> {
    check_strength(strength)?;
    check_rgba_len("image", rgba, width, height)?;

    let size = width * height;
    let mut channel = vec![0u8; size];
    for c in 0..3 {
        for (i, px) in rgba.chunks_exact(4).enumerate() {
            channel[i] = px[c];
        }
        algorithm.run(&mut channel, width, height, strength);
        for (i, px) in rgba.chunks_exact_mut(4).enumerate() {
            px[c] = channel[i];
        }
    }

    tracing::debug!(algorithm = %algorithm, width, height, strength, "Dithered channels");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        (0..width * height)
            .map(|i| ((i % width) * 255 / (width - 1)) as u8)
            .collect()
    }

    #[test]
    fn test_every_key_parses_and_round_trips() {
        for key in DitherAlgorithm::KEYS {
            let algorithm: DitherAlgorithm = key.parse().unwrap();
            assert_eq!(algorithm.key(), key);
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "dot".parse::<DitherAlgorithm>().unwrap_err();
        assert_eq!(err, AlgorithmError::Unknown("dot".to_string()));
    }

    #[test]
    fn test_all_algorithms_binarize() {
        for key in DitherAlgorithm::KEYS {
            let algorithm: DitherAlgorithm = key.parse().unwrap();
            for t in [0.0, 0.5, 1.0] {
                let mut channel = gradient(16, 16);
                algorithm.apply(&mut channel, 16, 16, t).unwrap();
                assert!(
                    channel.iter().all(|&v| v == 0 || v == 255),
                    "{key} at t={t} produced a non-binary value"
                );
            }
        }
    }

    #[test]
    fn test_extremes_are_preserved() {
        for key in DitherAlgorithm::KEYS {
            if key == "thr" {
                continue;
            }
            let algorithm: DitherAlgorithm = key.parse().unwrap();
            let mut black = vec![0u8; 64];
            algorithm.apply(&mut black, 8, 8, 0.5).unwrap();
            assert!(black.iter().all(|&v| v == 0), "{key} lit a black pixel");

            let mut white = vec![255u8; 64];
            algorithm.apply(&mut white, 8, 8, 0.5).unwrap();
            assert!(white.iter().all(|&v| v == 255), "{key} cleared a white pixel");
        }
    }

    #[test]
    fn test_strength_out_of_range() {
        let mut channel = vec![10u8; 4];
        let err = DitherAlgorithm::Bayer2
            .apply(&mut channel, 2, 2, 1.5)
            .unwrap_err();
        assert_eq!(err, ScreenError::Algorithm(AlgorithmError::Strength(1.5)));
        assert_eq!(channel, vec![10u8; 4]);

        assert!(DitherAlgorithm::Bayer2
            .apply(&mut channel, 2, 2, f32::NAN)
            .is_err());
    }

    #[test]
    fn test_channel_length_mismatch() {
        let mut channel = vec![10u8; 5];
        let err = DitherAlgorithm::Threshold
            .apply(&mut channel, 2, 2, 0.5)
            .unwrap_err();
        assert!(matches!(
            err,
            ScreenError::Shape(ShapeError::BufferLength { expected: 4, .. })
        ));
    }

    #[test]
    fn test_short_channel_rejected_by_every_algorithm() {
        for key in DitherAlgorithm::KEYS {
            let algorithm: DitherAlgorithm = key.parse().unwrap();
            let mut channel = vec![90u8; 60];
            let result = algorithm.apply(&mut channel, 8, 8, 1.0);
            assert!(
                matches!(
                    result,
                    Err(ScreenError::Shape(ShapeError::BufferLength { expected: 64, actual: 60, .. }))
                ),
                "{key}"
            );
            assert_eq!(channel, vec![90u8; 60], "{key}");
        }
    }

    #[test]
    fn test_rgba_channels_independent_and_alpha_kept() {
        let mut rgba = Vec::new();
        for _ in 0..64 {
            rgba.extend_from_slice(&[200, 30, 128, 77]);
        }
        dither_rgba_channels(&mut rgba, 8, 8, DitherAlgorithm::Threshold, 0.5).unwrap();
        for px in rgba.chunks_exact(4) {
            assert_eq!(px, &[255, 0, 255, 77]);
        }
    }

    #[test]
    fn test_rgba_length_rejected_before_mutation() {
        let mut rgba = vec![100u8; 10];
        let result = dither_rgba_channels(&mut rgba, 2, 2, DitherAlgorithm::Bayer2, 0.5);
        assert!(result.is_err());
        assert_eq!(rgba, vec![100u8; 10]);
    }
}
