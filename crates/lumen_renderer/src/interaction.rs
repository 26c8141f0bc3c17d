//! Surface hit records.

use crate::{light::Light, MaterialParams};
use lumen_math::Vec3;

/// Distance a spawned ray origin is pushed off the surface.
pub const RAY_EPSILON: f32 = 1e-3;

/// Record of a ray-surface intersection.
///
/// Lives for a single bounce; `light` borrows from the scene that produced it.
#[derive(Clone, Copy)]
pub struct SurfaceInteraction<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit geometric normal, pointing out of the surface regardless of the ray
    pub n: Vec3,
    /// Ray parameter at the intersection
    pub t: f32,
    /// Material parameters at the intersection point
    pub material: MaterialParams,
    /// The emitter this surface belongs to, if it is one
    pub light: Option<&'a dyn Light>,
}

impl<'a> SurfaceInteraction<'a> {
    /// Origin for a ray leaving the surface.
    ///
    /// `below` selects the side opposite the outward normal, used for
    /// transmitted rays and rays leaving the inside of a closed surface.
    #[inline]
    pub fn offset_origin(&self, below: bool) -> Vec3 {
        if below {
            self.p - RAY_EPSILON * self.n
        } else {
            self.p + RAY_EPSILON * self.n
        }
    }

    /// Normal flipped to lie in the same hemisphere as `w`.
    #[inline]
    pub fn facing(&self, w: Vec3) -> Vec3 {
        if self.n.dot(w) < 0.0 {
            -self.n
        } else {
            self.n
        }
    }
}

impl std::fmt::Debug for SurfaceInteraction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceInteraction")
            .field("p", &self.p)
            .field("n", &self.n)
            .field("t", &self.t)
            .field("material", &self.material)
            .field("emissive", &self.light.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_at_origin() -> SurfaceInteraction<'static> {
        SurfaceInteraction {
            p: Vec3::ZERO,
            n: Vec3::Y,
            t: 1.0,
            material: MaterialParams::default(),
            light: None,
        }
    }

    #[test]
    fn test_offset_origin() {
        let si = hit_at_origin();

        assert!(si.offset_origin(false).y > 0.0);
        assert!(si.offset_origin(true).y < 0.0);
        assert!((si.offset_origin(false).length() - RAY_EPSILON).abs() < 1e-7);
    }

    #[test]
    fn test_facing() {
        let si = hit_at_origin();

        assert_eq!(si.facing(Vec3::new(0.3, 1.0, 0.0)), Vec3::Y);
        assert_eq!(si.facing(Vec3::new(0.3, -1.0, 0.0)), -Vec3::Y);
    }
}
