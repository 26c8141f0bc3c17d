//! Per-pixel sample sources.

use lumen_math::{UVec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform samples, restarted for every pixel.
///
/// Each render worker owns its own instance obtained through
/// [`Sampler::clone_box`]; instances are never shared between threads.
pub trait Sampler: Send {
    /// An independent instance with the same configuration.
    fn clone_box(&self) -> Box<dyn Sampler>;

    /// Number of camera samples taken for each pixel.
    fn samples_per_pixel(&self) -> u32;

    /// Restart the sample stream for `pixel`.
    fn start_pixel(&mut self, pixel: UVec2);

    /// Next sample in [0, 1).
    fn get_1d(&mut self) -> f32;

    /// Next sample in [0, 1)^2.
    fn get_2d(&mut self) -> Vec2;
}

/// Uniform random sampler whose stream depends only on the seed and pixel.
///
/// Because the generator is reseeded from the pixel coordinates in
/// [`start_pixel`](Sampler::start_pixel), a pixel sees the same samples no
/// matter which thread renders it or in which order pixels are visited.
#[derive(Debug, Clone)]
pub struct IndependentSampler {
    samples_per_pixel: u32,
    seed: u64,
    rng: StdRng,
}

impl IndependentSampler {
    pub fn new(samples_per_pixel: u32, seed: u64) -> Self {
        Self {
            samples_per_pixel: samples_per_pixel.max(1),
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for IndependentSampler {
    fn clone_box(&self) -> Box<dyn Sampler> {
        Box::new(Self::new(self.samples_per_pixel, self.seed))
    }

    fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    fn start_pixel(&mut self, pixel: UVec2) {
        let coords = (u64::from(pixel.y) << 32) | u64::from(pixel.x);
        self.rng = StdRng::seed_from_u64(mix64(self.seed ^ mix64(coords)));
    }

    fn get_1d(&mut self) -> f32 {
        self.rng.gen()
    }

    fn get_2d(&mut self) -> Vec2 {
        Vec2::new(self.rng.gen(), self.rng.gen())
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(sampler: &mut dyn Sampler, n: usize) -> Vec<f32> {
        (0..n).map(|_| sampler.get_1d()).collect()
    }

    #[test]
    fn test_samples_in_unit_range() {
        let mut sampler = IndependentSampler::new(4, 1);
        sampler.start_pixel(UVec2::new(3, 9));
        for _ in 0..1000 {
            let u = sampler.get_2d();
            assert!((0.0..1.0).contains(&u.x));
            assert!((0.0..1.0).contains(&u.y));
        }
    }

    #[test]
    fn test_stream_depends_only_on_pixel() {
        let mut a = IndependentSampler::new(4, 42);
        let mut b = a.clone_box();

        // Consume from a different pixel first; the restart must not care
        b.start_pixel(UVec2::new(100, 7));
        draw(b.as_mut(), 13);

        a.start_pixel(UVec2::new(5, 6));
        b.start_pixel(UVec2::new(5, 6));
        assert_eq!(draw(&mut a, 16), draw(b.as_mut(), 16));
    }

    #[test]
    fn test_pixels_get_distinct_streams() {
        let mut sampler = IndependentSampler::new(1, 42);
        sampler.start_pixel(UVec2::new(0, 1));
        let first = draw(&mut sampler, 8);
        sampler.start_pixel(UVec2::new(1, 0));
        let second = draw(&mut sampler, 8);

        assert_ne!(first, second);
    }

    #[test]
    fn test_samples_per_pixel_is_at_least_one() {
        assert_eq!(IndependentSampler::new(0, 0).samples_per_pixel(), 1);
        assert_eq!(IndependentSampler::new(16, 0).clone_box().samples_per_pixel(), 16);
    }
}
