//! Scattering model interface.

use crate::{interaction::SurfaceInteraction, Color};
use lumen_math::{Vec2, Vec3};

/// A direction importance-sampled from a BSDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BsdfSample {
    /// Sampled incident direction (unit, world space)
    pub wi: Vec3,
    /// `f * |cos| / pdf`, the factor applied to path throughput
    pub weight: Color,
    /// Solid-angle density of `wi`; for delta lobes the lobe selection probability
    pub pdf: f32,
    /// True when `wi` came from a delta distribution
    pub is_delta: bool,
    /// True when the sample carries no energy and the path must stop
    pub is_degenerate: bool,
    /// True when `wi` leaves on the side opposite the outward normal
    pub below_surface: bool,
}

impl BsdfSample {
    /// A sample that contributes nothing.
    pub fn degenerate() -> Self {
        Self {
            wi: Vec3::ZERO,
            weight: Color::ZERO,
            pdf: 0.0,
            is_delta: false,
            is_degenerate: true,
            below_surface: false,
        }
    }
}

/// Trait for scattering models evaluated at a surface hit.
///
/// `wo` always points away from the surface, back along the arriving ray.
pub trait Bsdf: Send + Sync {
    /// Importance-sample an incident direction.
    ///
    /// `u_lobe` chooses between lobes and `u` drives the chosen lobe.
    fn sample(&self, si: &SurfaceInteraction, wo: Vec3, u_lobe: f32, u: Vec2) -> BsdfSample;

    /// Value `f(wo, wi) * |cos(wi)|` and the density `sample` assigns to `wi`.
    ///
    /// Delta lobes are never reported; both values are zero for them.
    fn evaluate(&self, si: &SurfaceInteraction, wi: Vec3, wo: Vec3) -> (Color, f32);
}
