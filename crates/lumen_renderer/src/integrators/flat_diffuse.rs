use super::{sky_gradient, Integrator};
use crate::{interaction::RAY_EPSILON, sampling::uniform_sample_ball, Color, Ray, Sampler, Scene};

/// Every surface as a grey diffuser lit only by the sky.
///
/// Each bounce scatters around the normal by adding a random point of the
/// unit ball, and halves the throughput.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatDiffuseIntegrator;

impl FlatDiffuseIntegrator {
    /// Fraction of light kept per bounce.
    pub const ALBEDO: f32 = 0.5;
}

impl Integrator for FlatDiffuseIntegrator {
    fn li(&self, ray: Ray, scene: &Scene, max_depth: u32, sampler: &mut dyn Sampler) -> Color {
        let mut throughput = Color::ONE;
        let mut ray = ray;

        for _ in 0..max_depth {
            let Some(si) = scene.intersect(&ray) else {
                return throughput * sky_gradient(ray.direction);
            };

            let n = si.facing(-ray.direction);
            let mut direction = n + uniform_sample_ball(sampler.get_2d(), sampler.get_1d());
            // Catch degenerate scatter direction
            if direction.length_squared() < 1e-8 {
                direction = n;
            }

            throughput *= Self::ALBEDO;
            ray = Ray::new(si.p + RAY_EPSILON * n, direction.normalize());
        }

        // Bounce budget spent without reaching the sky
        Color::ZERO
    }
}
