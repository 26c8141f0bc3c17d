use super::Integrator;
use crate::{Color, Ray, Sampler, Scene};

/// Red where the ray hits anything, blue where it escapes.
///
/// Checks intersection wiring without any shading.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitIntegrator;

impl HitIntegrator {
    pub const HIT: Color = Color::new(1.0, 0.0, 0.0);
    pub const MISS: Color = Color::new(0.0, 0.0, 1.0);
}

impl Integrator for HitIntegrator {
    fn li(&self, ray: Ray, scene: &Scene, _max_depth: u32, _sampler: &mut dyn Sampler) -> Color {
        if scene.intersect(&ray).is_some() {
            Self::HIT
        } else {
            Self::MISS
        }
    }
}
