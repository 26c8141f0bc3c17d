//! Geometric shapes that can be tested against rays.

use crate::Ray;
use lumen_math::{Interval, Vec3};

/// Geometric part of an intersection, before material binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit outward normal
    pub n: Vec3,
}

/// Trait for geometry that can be hit by rays.
pub trait Shape: Send + Sync {
    /// Nearest intersection with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit>;
}
