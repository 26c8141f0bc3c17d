//! Radiance estimators.
//!
//! Every estimator maps a camera ray to the radiance arriving along it. The
//! variant is picked once per render through [`IntegratorType`].

mod flat_diffuse;
mod hit;
mod normals;
mod path;

#[cfg(test)]
pub(crate) mod mocks;

pub use flat_diffuse::FlatDiffuseIntegrator;
pub use hit::HitIntegrator;
pub use normals::NormalsIntegrator;
pub use path::PathIntegrator;

use crate::{error::ParseIntegratorError, Color, Principled, Ray, Sampler, Scene};
use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public interface for radiance estimators.
///
/// Implementations read the scene and draw random numbers only from
/// `sampler`; they never mutate shared state, so one instance serves every
/// render thread.
pub trait Integrator: Send + Sync {
    /// Evaluates the incoming radiance along `ray`, following at most `max_depth` bounces.
    fn li(&self, ray: Ray, scene: &Scene, max_depth: u32, sampler: &mut dyn Sampler) -> Color;
}

/// The closed set of estimators a render can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegratorType {
    /// Fixed colors for hit and miss
    Hit,
    /// Surface normals mapped to RGB
    Normals,
    /// Flat-albedo diffuse bounces under the sky
    FlatDiffuse,
    /// Multiple importance sampled path tracing
    #[default]
    Path,
}

impl IntegratorType {
    pub const ALL: [IntegratorType; 4] = [
        IntegratorType::Hit,
        IntegratorType::Normals,
        IntegratorType::FlatDiffuse,
        IntegratorType::Path,
    ];

    pub fn instantiate(self) -> Box<dyn Integrator> {
        match self {
            IntegratorType::Hit => Box::new(HitIntegrator),
            IntegratorType::Normals => Box::new(NormalsIntegrator),
            IntegratorType::FlatDiffuse => Box::new(FlatDiffuseIntegrator),
            IntegratorType::Path => Box::new(PathIntegrator::<Principled>::default()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntegratorType::Hit => "hit",
            IntegratorType::Normals => "normals",
            IntegratorType::FlatDiffuse => "flat-diffuse",
            IntegratorType::Path => "path",
        }
    }
}

impl fmt::Display for IntegratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntegratorType {
    type Err = ParseIntegratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == wanted)
            .ok_or_else(|| ParseIntegratorError(s.to_string()))
    }
}

/// Compute sky gradient background.
///
/// White toward the horizon and below, sky blue straight up.
pub fn sky_gradient(direction: Vec3) -> Color {
    let unit_direction = direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}
