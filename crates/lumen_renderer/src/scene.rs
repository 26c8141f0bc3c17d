//! Scene: intersection oracle plus the ordered list of emitters.

use crate::{
    interaction::SurfaceInteraction,
    light::{Light, QuadLight, SphereLight},
    shape::Shape,
    MaterialParams, Ray,
};
use lumen_math::Interval;
use std::sync::Arc;

/// Smallest ray parameter accepted as a hit.
pub const T_MIN: f32 = 1e-4;

/// Trait for geometry that answers ray queries.
///
/// Implementations are shared by every render thread without locking, so
/// both queries must be reentrant.
pub trait Intersect: Send + Sync {
    /// Closest intersection along `ray` within `(T_MIN, ray.t_max)`.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceInteraction<'_>>;

    /// True if anything blocks `ray` within `(T_MIN, ray.t_max)`.
    fn intersect_p(&self, ray: &Ray) -> bool;
}

/// A shape bound to a material and, for emitters, to its light.
pub struct Primitive {
    shape: Box<dyn Shape>,
    material: MaterialParams,
    light: Option<Arc<dyn Light>>,
}

impl Primitive {
    pub fn new(shape: impl Shape + 'static, material: MaterialParams) -> Self {
        Self {
            shape: Box::new(shape),
            material,
            light: None,
        }
    }

    /// Mark the primitive as the surface of `light`.
    pub fn with_light(mut self, light: Arc<dyn Light>) -> Self {
        self.light = Some(light);
        self
    }
}

/// A list of primitives tested one after another.
#[derive(Default)]
pub struct PrimitiveList {
    primitives: Vec<Primitive>,
}

impl PrimitiveList {
    /// Create a new empty primitive list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive to the list.
    pub fn add(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Intersect for PrimitiveList {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceInteraction<'_>> {
        let mut closest_so_far = ray.t_max;
        let mut nearest = None;

        for primitive in &self.primitives {
            let interval = Interval::new(T_MIN, closest_so_far);
            if let Some(hit) = primitive.shape.hit(ray, interval) {
                closest_so_far = hit.t;
                nearest = Some((primitive, hit));
            }
        }

        nearest.map(|(primitive, hit)| SurfaceInteraction {
            p: hit.p,
            n: hit.n,
            t: hit.t,
            material: primitive.material,
            light: primitive.light.as_deref(),
        })
    }

    fn intersect_p(&self, ray: &Ray) -> bool {
        let interval = Interval::new(T_MIN, ray.t_max);
        self.primitives
            .iter()
            .any(|primitive| primitive.shape.hit(ray, interval).is_some())
    }
}

/// Everything an estimator can query: geometry and lights.
pub struct Scene {
    geometry: Box<dyn Intersect>,
    lights: Vec<Arc<dyn Light>>,
}

impl Scene {
    pub fn new(geometry: impl Intersect + 'static, lights: Vec<Arc<dyn Light>>) -> Self {
        Self {
            geometry: Box::new(geometry),
            lights,
        }
    }

    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceInteraction<'_>> {
        self.geometry.intersect(ray)
    }

    #[inline]
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.geometry.intersect_p(ray)
    }

    /// Emitters in a fixed order.
    #[inline]
    pub fn lights(&self) -> &[Arc<dyn Light>] {
        &self.lights
    }
}

/// Incremental construction of a [`Scene`] over a [`PrimitiveList`].
///
/// Emissive shapes are registered both as geometry and as lights, sharing
/// one `Arc` so hits on them report the light that was sampled.
#[derive(Default)]
pub struct SceneBuilder {
    primitives: PrimitiveList,
    lights: Vec<Arc<dyn Light>>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a non-emissive shape.
    pub fn add(&mut self, shape: impl Shape + 'static, material: MaterialParams) -> &mut Self {
        self.primitives.add(Primitive::new(shape, material));
        self
    }

    /// Add a spherical emitter.
    pub fn add_sphere_light(&mut self, light: SphereLight, material: MaterialParams) -> &mut Self {
        let shape = light.shape();
        self.add_light(shape, Arc::new(light), material)
    }

    /// Add a parallelogram emitter.
    pub fn add_quad_light(&mut self, light: QuadLight, material: MaterialParams) -> &mut Self {
        let shape = light.shape();
        self.add_light(shape, Arc::new(light), material)
    }

    fn add_light(
        &mut self,
        shape: impl Shape + 'static,
        light: Arc<dyn Light>,
        material: MaterialParams,
    ) -> &mut Self {
        self.primitives
            .add(Primitive::new(shape, material).with_light(Arc::clone(&light)));
        self.lights.push(light);
        self
    }

    pub fn build(self) -> Scene {
        log::debug!(
            "Built scene with {} primitives and {} lights",
            self.primitives.len(),
            self.lights.len()
        );
        Scene::new(self.primitives, self.lights)
    }
}
