//! Planar parallelogram primitive.

use crate::{
    shape::{Shape, ShapeHit},
    Ray,
};
use lumen_math::{Interval, Vec3};

/// A parallelogram spanned by `u` and `v` from corner `q`.
///
/// The outward normal is `normalize(u x v)`.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    normal: Vec3,
    d: f32,
    w: Vec3,
    area: f32,
}

impl Quad {
    pub fn new(q: Vec3, u: Vec3, v: Vec3) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        Self {
            q,
            u,
            v,
            normal,
            d: normal.dot(q),
            w: n / n.dot(n),
            area: n.length(),
        }
    }

    pub fn corner(&self) -> Vec3 {
        self.q
    }

    pub fn edges(&self) -> (Vec3, Vec3) {
        (self.u, self.v)
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn area(&self) -> f32 {
        self.area
    }
}

impl Shape for Quad {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        let planar = p - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        if Interval::UNIT.contains(alpha) && Interval::UNIT.contains(beta) {
            Some(ShapeHit {
                t,
                p,
                n: self.normal,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Quad {
        // Unit square in the xz plane facing +y
        Quad::new(Vec3::ZERO, Vec3::Z, Vec3::X)
    }

    #[test]
    fn test_quad_normal_and_area() {
        let quad = floor();
        assert!((quad.normal() - Vec3::Y).length() < 1e-6);
        assert!((quad.area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quad_hit_inside() {
        let ray = Ray::new(Vec3::new(0.5, 1.0, 0.5), -Vec3::Y);
        let hit = floor().hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!((hit.p - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_quad_miss_outside_edges() {
        let ray = Ray::new(Vec3::new(1.5, 1.0, 0.5), -Vec3::Y);
        assert!(floor().hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_quad_parallel_ray() {
        let ray = Ray::new(Vec3::new(0.5, 1.0, 0.5), Vec3::X);
        assert!(floor().hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}
