//! Lumen - CPU Monte Carlo renderer
//!
//! Turns a scene description and a camera into an image by estimating the
//! radiance arriving through every pixel:
//! - Four estimators, from a hit/miss mask up to a path tracer that combines
//!   BSDF and light sampling with multiple importance sampling
//! - Sequential or row-parallel rendering with identical results
//! - A principled (Disney-style) surface model

mod bsdf;
mod camera;
mod disney;
mod error;
mod film;
mod interaction;
mod integrators;
mod light;
mod material;
mod partition;
mod progress;
mod quad;
mod renderer;
mod sampler;
pub mod sampling;
mod scene;
mod shape;
mod sphere;

pub use bsdf::{Bsdf, BsdfSample};
pub use camera::Camera;
pub use disney::Principled;
pub use error::{ParseIntegratorError, RenderError, Result};
pub use film::{color_to_rgb, linear_to_gamma, Film, FilmRows};
pub use interaction::{SurfaceInteraction, RAY_EPSILON};
pub use integrators::{
    sky_gradient, FlatDiffuseIntegrator, HitIntegrator, Integrator, IntegratorType,
    NormalsIntegrator, PathIntegrator,
};
pub use light::{Light, LightSample, QuadLight, SphereLight};
pub use material::{Color, MaterialParams, DELTA_ROUGHNESS};
pub use partition::{partition_rows, RowRange};
pub use progress::{LogProgress, Progress, SilentProgress};
pub use quad::Quad;
pub use renderer::{RenderConfig, Renderer, RowOrder};
pub use sampler::{IndependentSampler, Sampler};
pub use scene::{Intersect, Primitive, PrimitiveList, Scene, SceneBuilder, T_MIN};
pub use shape::{Shape, ShapeHit};
pub use sphere::Sphere;

/// Re-export the math types used throughout the public API
pub use lumen_math::{Interval, Ray, UVec2, Vec2, Vec3};
