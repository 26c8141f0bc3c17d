//! Test doubles for scene and light collaborators.

use crate::{
    interaction::SurfaceInteraction,
    light::{Light, LightSample},
    scene::Intersect,
    Color, MaterialParams, PrimitiveList, Ray, Scene,
};
use lumen_math::{Vec2, Vec3};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Call counters shared between a test and the doubles it installs.
#[derive(Debug, Default)]
pub struct Calls {
    pub intersect: AtomicUsize,
    pub intersect_p: AtomicUsize,
    pub sample_incident: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub fn empty_scene() -> Scene {
    Scene::new(PrimitiveList::new(), Vec::new())
}

/// Geometry that returns a fixed hit for its first `hits` queries and
/// misses afterwards.
pub struct ScriptedGeometry {
    pub calls: Arc<Calls>,
    pub hits: usize,
    pub p: Vec3,
    pub n: Vec3,
    pub material: MaterialParams,
    /// Turns the hits from a given query on into emitter hits
    pub emitter: Option<ScriptedEmitter>,
}

/// Emitter surface reported by [`ScriptedGeometry`] from query `from_call` on.
pub struct ScriptedEmitter {
    pub light: Arc<dyn Light>,
    pub from_call: usize,
    pub n: Vec3,
}

impl Intersect for ScriptedGeometry {
    fn intersect(&self, _ray: &Ray) -> Option<SurfaceInteraction<'_>> {
        let call = self.calls.intersect.fetch_add(1, Ordering::SeqCst);
        if call >= self.hits {
            return None;
        }

        let mut si = SurfaceInteraction {
            p: self.p,
            n: self.n,
            t: 1.0,
            material: self.material,
            light: None,
        };
        if let Some(emitter) = self.emitter.as_ref().filter(|e| call >= e.from_call) {
            si.n = emitter.n;
            si.light = Some(emitter.light.as_ref());
        }
        Some(si)
    }

    fn intersect_p(&self, _ray: &Ray) -> bool {
        self.calls.intersect_p.fetch_add(1, Ordering::SeqCst);
        false
    }
}

/// A light straight above the origin that counts its samples.
pub struct CountingLight {
    pub calls: Arc<Calls>,
}

impl Light for CountingLight {
    fn sample_incident(&self, p: Vec3, _u: Vec2) -> LightSample {
        self.calls.sample_incident.fetch_add(1, Ordering::SeqCst);
        LightSample {
            wi: Vec3::Y,
            distance: (10.0 - p.y).max(0.0),
            pdf: 1.0,
            emittance: Color::ONE,
            is_degenerate: false,
        }
    }

    fn pdf(&self, _wi: Vec3, _origin: Vec3, _point: Vec3) -> f32 {
        1.0
    }

    fn emittance(&self) -> Color {
        Color::ONE
    }
}

/// Emitter with a fixed density whose own samples are always degenerate,
/// so it only contributes when a BSDF-sampled ray hits it.
pub struct FixedPdfLight {
    pub pdf: f32,
    pub emittance: Color,
}

impl Light for FixedPdfLight {
    fn sample_incident(&self, _p: Vec3, _u: Vec2) -> LightSample {
        LightSample::degenerate()
    }

    fn pdf(&self, _wi: Vec3, _origin: Vec3, _point: Vec3) -> f32 {
        self.pdf
    }

    fn emittance(&self) -> Color {
        self.emittance
    }
}
