//! Area emitters and their sampling densities.
//!
//! Every density is expressed with respect to solid angle at the shaded
//! point, so the light and BSDF strategies can be combined directly.

use crate::{
    quad::Quad,
    sampling::{to_world, uniform_cone_pdf, uniform_sample_cone},
    sphere::Sphere,
    Color,
};
use lumen_math::{Vec2, Vec3};

/// A direction sampled toward an emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit direction from the shaded point toward the light
    pub wi: Vec3,
    /// Distance along `wi` to the sampled point on the light
    pub distance: f32,
    /// Solid-angle density of `wi`
    pub pdf: f32,
    /// Radiance arriving along `wi`
    pub emittance: Color,
    /// True when the sample carries no energy and must be skipped
    pub is_degenerate: bool,
}

impl LightSample {
    /// A sample that contributes nothing.
    pub fn degenerate() -> Self {
        Self {
            wi: Vec3::ZERO,
            distance: 0.0,
            pdf: 0.0,
            emittance: Color::ZERO,
            is_degenerate: true,
        }
    }
}

/// Trait for emitters that can be sampled from a shading point.
pub trait Light: Send + Sync {
    /// Sample a direction from `p` toward the light.
    fn sample_incident(&self, p: Vec3, u: Vec2) -> LightSample;

    /// Density [`sample_incident`](Light::sample_incident) would assign to
    /// `wi` when called from `origin`, given that `wi` reaches the light at `point`.
    fn pdf(&self, wi: Vec3, origin: Vec3, point: Vec3) -> f32;

    /// Emitted radiance.
    fn emittance(&self) -> Color;
}

/// Spherical emitter sampled by the cone it subtends.
#[derive(Debug, Clone, Copy)]
pub struct SphereLight {
    sphere: Sphere,
    emittance: Color,
}

impl SphereLight {
    pub fn new(sphere: Sphere, emittance: Color) -> Self {
        Self { sphere, emittance }
    }

    pub fn shape(&self) -> Sphere {
        self.sphere
    }

    /// Cone axis and cosine of its half-angle, or None from inside the sphere.
    fn subtended_cone(&self, origin: Vec3) -> Option<(Vec3, f32)> {
        let to_center = self.sphere.center() - origin;
        let dist_sq = to_center.length_squared();
        let radius_sq = self.sphere.radius() * self.sphere.radius();
        if dist_sq <= radius_sq {
            return None;
        }

        let cos_max = (1.0 - radius_sq / dist_sq).max(0.0).sqrt();
        if cos_max >= 1.0 {
            return None;
        }
        Some((to_center / dist_sq.sqrt(), cos_max))
    }
}

impl Light for SphereLight {
    fn sample_incident(&self, p: Vec3, u: Vec2) -> LightSample {
        let Some((axis, cos_max)) = self.subtended_cone(p) else {
            return LightSample::degenerate();
        };

        let wi = to_world(uniform_sample_cone(u, cos_max), axis).normalize();

        // Nearest root; clamp the discriminant for grazing directions
        let to_center = self.sphere.center() - p;
        let h = wi.dot(to_center);
        let c = to_center.length_squared() - self.sphere.radius() * self.sphere.radius();
        let distance = h - (h * h - c).max(0.0).sqrt();

        LightSample {
            wi,
            distance,
            pdf: uniform_cone_pdf(cos_max),
            emittance: self.emittance,
            is_degenerate: false,
        }
    }

    fn pdf(&self, wi: Vec3, origin: Vec3, _point: Vec3) -> f32 {
        match self.subtended_cone(origin) {
            Some((axis, cos_max)) if wi.normalize().dot(axis) >= cos_max => {
                uniform_cone_pdf(cos_max)
            }
            _ => 0.0,
        }
    }

    fn emittance(&self) -> Color {
        self.emittance
    }
}

/// One-sided parallelogram emitter, emitting along its normal.
#[derive(Debug, Clone, Copy)]
pub struct QuadLight {
    quad: Quad,
    emittance: Color,
}

impl QuadLight {
    pub fn new(quad: Quad, emittance: Color) -> Self {
        Self { quad, emittance }
    }

    pub fn shape(&self) -> Quad {
        self.quad
    }

    /// Convert the uniform area density to solid angle.
    fn solid_angle_pdf(&self, wi: Vec3, dist_sq: f32) -> f32 {
        let cos_light = -self.quad.normal().dot(wi);
        if cos_light <= 0.0 || dist_sq <= 0.0 {
            return 0.0;
        }
        dist_sq / (cos_light * self.quad.area())
    }
}

impl Light for QuadLight {
    fn sample_incident(&self, p: Vec3, u: Vec2) -> LightSample {
        let (edge_u, edge_v) = self.quad.edges();
        let q = self.quad.corner() + u.x * edge_u + u.y * edge_v;

        let to_light = q - p;
        let dist_sq = to_light.length_squared();
        let distance = dist_sq.sqrt();
        if distance <= 0.0 {
            return LightSample::degenerate();
        }

        let wi = to_light / distance;
        let pdf = self.solid_angle_pdf(wi, dist_sq);
        if pdf <= 0.0 {
            return LightSample::degenerate();
        }

        LightSample {
            wi,
            distance,
            pdf,
            emittance: self.emittance,
            is_degenerate: false,
        }
    }

    fn pdf(&self, wi: Vec3, origin: Vec3, point: Vec3) -> f32 {
        self.solid_angle_pdf(wi.normalize(), point.distance_squared(origin))
    }

    fn emittance(&self) -> Color {
        self.emittance
    }
}
