//! Seeded noise dithering.
//!
//! Both variants draw from a [`StdRng`] seeded per call, so every channel of
//! an image sees the same noise field and repeated runs are identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Add uniform noise in `[-t/2, t/2]` to the normalized value, then cut at 0.5.
///
/// At `t = 0` this is a plain `> 127` threshold.
pub(super) fn blue_noise(channel: &mut [u8], t: f32, seed: u64) {
    let amplitude = t / 2.0;
    if amplitude <= 0.0 {
        for v in channel.iter_mut() {
            *v = if *v > 127 { 255 } else { 0 };
        }
        return;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for v in channel.iter_mut() {
        let normalized = *v as f32 / 255.0;
        let noise = (rng.gen::<f32>() * 2.0 - 1.0) * amplitude;
        *v = if normalized + noise > 0.5 { 255 } else { 0 };
    }
}

/// Compare each pixel against `(1 - t) * 0.5 + t * r` for a fresh random `r`.
pub(super) fn random_threshold(channel: &mut [u8], t: f32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for v in channel.iter_mut() {
        let normalized = *v as f32 / 255.0;
        let threshold = (1.0 - t) * 0.5 + t * rng.gen::<f32>();
        *v = if normalized > threshold { 255 } else { 0 };
    }
}
