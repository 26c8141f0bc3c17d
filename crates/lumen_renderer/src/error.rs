//! Error types for the fallible edges of a render.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring a render or writing its output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to start render threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write image {path}: {source}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// An integrator name that matches none of the known estimators.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown integrator '{0}' (expected one of: hit, normals, flat-diffuse, path)")]
pub struct ParseIntegratorError(pub String);

/// Result alias for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
