//! Random sampling helpers.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Sub-pixel offset for one sample.
///
/// A single sample goes through the pixel center `(0.5, 0.5)`; multiple
/// samples draw both offsets uniformly from [0, 1).
#[inline]
pub fn pixel_jitter(samples_per_pixel: u32, rng: &mut dyn RngCore) -> (f32, f32) {
    if samples_per_pixel > 1 {
        (gen_f32(rng), gen_f32(rng))
    } else {
        (0.5, 0.5)
    }
}

/// RNG for one unit of parallel work.
///
/// With a seed, stream `index` is seeded with `seed + index`, so results do
/// not depend on which thread picks the work up. Without one, drawn from entropy.
pub fn stream_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}
