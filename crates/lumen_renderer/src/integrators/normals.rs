use super::{sky_gradient, Integrator};
use crate::{Color, Ray, Sampler, Scene};

/// Visualizes the surface normal as a color, with the sky gradient on misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalsIntegrator;

impl Integrator for NormalsIntegrator {
    fn li(&self, ray: Ray, scene: &Scene, _max_depth: u32, _sampler: &mut dyn Sampler) -> Color {
        match scene.intersect(&ray) {
            // Map each component from [-1, 1] to [0, 1]
            Some(si) => 0.5 * (si.n.normalize() + Color::ONE),
            None => sky_gradient(ray.direction),
        }
    }
}
