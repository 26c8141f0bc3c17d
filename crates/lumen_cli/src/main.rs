//! `lumen` - render a built-in scene to an image file.

mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{IndependentSampler, IntegratorType, LogProgress, RenderConfig, Renderer};
use scenes::SceneKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "lumen", version, about = "CPU Monte Carlo renderer")]
struct Args {
    /// Estimator: hit, normals, flat-diffuse or path
    #[arg(short, long)]
    integrator: Option<IntegratorType>,

    /// Built-in scene: emissive-sphere, cornell or spheres
    #[arg(long)]
    scene: Option<SceneKind>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    spp: Option<u32>,

    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Worker threads (defaults to every core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Base seed for the per-pixel sample streams
    #[arg(long)]
    seed: Option<u64>,

    /// Output image; the extension picks the format
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON settings file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Everything needed to produce one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    integrator: IntegratorType,
    scene: SceneKind,
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    seed: u64,
    sequential: bool,
    render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            integrator: IntegratorType::default(),
            scene: SceneKind::default(),
            width: 400,
            height: 225,
            samples_per_pixel: 16,
            seed: 0,
            sequential: false,
            render: RenderConfig::default(),
        }
    }
}

impl Settings {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    /// Apply command-line overrides on top of these settings.
    fn merge(mut self, args: &Args) -> Self {
        if let Some(integrator) = args.integrator {
            self.integrator = integrator;
        }
        if let Some(scene) = args.scene {
            self.scene = scene;
        }
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
        if let Some(spp) = args.spp {
            self.samples_per_pixel = spp;
        }
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(max_depth) = args.max_depth {
            self.render.max_depth = max_depth;
        }
        if args.threads.is_some() {
            self.render.threads = args.threads;
        }
        if let Some(output) = &args.output {
            self.render.output = Some(output.clone());
        }
        self.sequential |= args.sequential;
        self
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .merge(&args);

    log::info!(
        "Rendering scene '{}' with the {} integrator",
        settings.scene,
        settings.integrator
    );

    let (scene, camera) = settings.scene.build();
    let camera = camera.with_resolution(settings.width, settings.height);
    let sampler = IndependentSampler::new(settings.samples_per_pixel, settings.seed);
    let integrator = settings.integrator.instantiate();

    let mut renderer = Renderer::new(camera, Box::new(sampler), settings.render.clone())
        .context("invalid render settings")?
        .with_progress(LogProgress::default());

    if settings.sequential {
        renderer.render(integrator.as_ref(), &scene)?;
    } else {
        renderer.multi_render(integrator.as_ref(), &scene)?;
    }

    if let Some(path) = &settings.render.output {
        log::info!("Saved {}x{} image to {}", settings.width, settings.height, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings_file() {
        let file: Settings = serde_json::from_str(
            r#"{
                "scene": "cornell",
                "width": 64,
                "samples_per_pixel": 4,
                "render": { "max_depth": 3, "output": "from-file.png" }
            }"#,
        )
        .unwrap();
        assert_eq!(file.height, 225);

        let args = Args::parse_from([
            "lumen",
            "--integrator",
            "normals",
            "--width",
            "32",
            "-j",
            "2",
            "--sequential",
        ]);
        let settings = file.merge(&args);

        assert_eq!(settings.integrator, IntegratorType::Normals);
        assert_eq!(settings.scene, SceneKind::Cornell);
        assert_eq!(settings.width, 32);
        assert_eq!(settings.samples_per_pixel, 4);
        assert_eq!(settings.render.max_depth, 3);
        assert_eq!(settings.render.threads, Some(2));
        assert_eq!(settings.render.output, Some(PathBuf::from("from-file.png")));
        assert!(settings.sequential);
    }

    #[test]
    fn test_bad_integrator_flag_is_rejected() {
        assert!(Args::try_parse_from(["lumen", "--integrator", "whitted"]).is_err());
    }

    #[test]
    fn test_defaults_without_flags() {
        let settings = Settings::default().merge(&Args::parse_from(["lumen"]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.integrator, IntegratorType::Path);
        assert_eq!(settings.render.output, Some(PathBuf::from("render.ppm")));
    }
}
