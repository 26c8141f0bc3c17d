//! Warping functions from the unit square to directions and points.
//!
//! All functions are deterministic in their sample arguments so the random
//! stream stays owned by the per-pixel [`Sampler`](crate::Sampler).

use lumen_math::{orthonormal_basis, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Map a square sample onto the unit disk, preserving stratification.
pub fn concentric_sample_disk(u: Vec2) -> Vec2 {
    let offset = 2.0 * u - Vec2::ONE;
    if offset == Vec2::ZERO {
        return Vec2::ZERO;
    }

    let (theta, r) = if offset.x.abs() > offset.y.abs() {
        (FRAC_PI_4 * (offset.y / offset.x), offset.x)
    } else {
        (FRAC_PI_2 - FRAC_PI_4 * (offset.x / offset.y), offset.y)
    };

    r * Vec2::new(theta.cos(), theta.sin())
}

/// Cosine-weighted direction around +z.
pub fn cosine_sample_hemisphere(u: Vec2) -> Vec3 {
    let d = concentric_sample_disk(u);
    let z = (1.0 - d.x * d.x - d.y * d.y).max(0.0).sqrt();
    Vec3::new(d.x, d.y, z)
}

#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: f32) -> f32 {
    cos_theta.max(0.0) / PI
}

/// Uniformly distributed direction on the unit sphere.
pub fn uniform_sample_sphere(u: Vec2) -> Vec3 {
    let z = 1.0 - 2.0 * u.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * u.y;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniformly distributed point inside the unit ball.
///
/// `u` picks the direction and `radius_u` the radial position.
pub fn uniform_sample_ball(u: Vec2, radius_u: f32) -> Vec3 {
    uniform_sample_sphere(u) * radius_u.cbrt()
}

/// Uniform direction inside the cone of half-angle `acos(cos_max)` around +z.
pub fn uniform_sample_cone(u: Vec2, cos_max: f32) -> Vec3 {
    let cos_theta = (1.0 - u.x) + u.x * cos_max;
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = 2.0 * PI * u.y;
    Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

#[inline]
pub fn uniform_cone_pdf(cos_max: f32) -> f32 {
    1.0 / (2.0 * PI * (1.0 - cos_max))
}

/// Rotate a direction given around +z into the frame whose z axis is `n`.
#[inline]
pub fn to_world(local: Vec3, n: Vec3) -> Vec3 {
    let (tangent, bitangent) = orthonormal_basis(n);
    local.x * tangent + local.y * bitangent + local.z * n
}

/// One-sample balance heuristic weight for the strategy with density `pdf`.
///
/// Returns 0 when both densities vanish, so the caller adds nothing.
#[inline]
pub fn balance_heuristic(pdf: f32, other_pdf: f32) -> f32 {
    let sum = pdf + other_pdf;
    if sum > 0.0 {
        pdf / sum
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_u(rng: &mut StdRng) -> Vec2 {
        Vec2::new(rng.gen(), rng.gen())
    }

    #[test]
    fn test_disk_stays_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(concentric_sample_disk(random_u(&mut rng)).length() <= 1.0 + 1e-5);
        }
        assert_eq!(concentric_sample_disk(Vec2::splat(0.5)), Vec2::ZERO);
    }

    #[test]
    fn test_hemisphere_is_upper_and_unit() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let w = cosine_sample_hemisphere(random_u(&mut rng));
            assert!(w.z >= 0.0);
            assert!((w.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ball_stays_inside() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = uniform_sample_ball(random_u(&mut rng), rng.gen());
            assert!(p.length() <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_cone_respects_angle() {
        let mut rng = StdRng::seed_from_u64(5);
        let cos_max = 0.9;
        for _ in 0..1000 {
            let w = uniform_sample_cone(random_u(&mut rng), cos_max);
            assert!(w.z >= cos_max - 1e-5);
        }
    }

    #[test]
    fn test_to_world_maps_z_to_normal() {
        let n = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((to_world(Vec3::Z, n) - n).length() < 1e-5);
    }

    #[test]
    fn test_balance_heuristic() {
        assert!((balance_heuristic(1.0, 3.0) - 0.25).abs() < 1e-6);
        assert!((balance_heuristic(2.0, 0.0) - 1.0).abs() < 1e-6);
        assert_eq!(balance_heuristic(0.0, 0.0), 0.0);
    }
}
