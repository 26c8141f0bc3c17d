//! Render driver.
//!
//! Owns the camera, film and master sampler, and turns an estimator plus a
//! scene into a finished image:
//! - `render` walks every row on the calling thread
//! - `multi_render` splits the rows into one contiguous band per worker
//! - both write the output file once, after the last pixel is stored

use crate::{
    error::{RenderError, Result},
    film::FilmRows,
    integrators::Integrator,
    partition::partition_rows,
    progress::{Progress, SilentProgress},
    Camera, Color, Film, Sampler, Scene,
};
use lumen_math::UVec2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

/// Order in which rows are visited inside a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrder {
    #[default]
    TopDown,
    BottomUp,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of bounces per camera ray
    pub max_depth: u32,
    /// Worker threads for `multi_render`; `None` uses every available core
    pub threads: Option<usize>,
    /// Row traversal order, which only affects progress reporting
    pub row_order: RowOrder,
    /// Image written after each full frame; `None` keeps the result in memory
    pub output: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            threads: None,
            row_order: RowOrder::TopDown,
            output: Some(PathBuf::from("render.ppm")),
        }
    }
}

impl RenderConfig {
    /// Reject settings no render can run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of workers `multi_render` will start.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(rayon::current_num_threads)
    }
}

/// Drives an estimator over every pixel of the camera's image.
pub struct Renderer {
    camera: Camera,
    film: Film,
    sampler: Box<dyn Sampler>,
    config: RenderConfig,
    progress: Box<dyn Progress>,
}

impl Renderer {
    /// Create a renderer; the film takes the camera's resolution.
    pub fn new(mut camera: Camera, sampler: Box<dyn Sampler>, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let resolution = camera.resolution();
        if resolution.x == 0 || resolution.y == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image resolution must be non-zero, got {}x{}",
                resolution.x, resolution.y
            )));
        }
        if resolution.x.checked_mul(resolution.y).is_none() {
            return Err(RenderError::InvalidConfig(format!(
                "image resolution {}x{} has too many pixels",
                resolution.x, resolution.y
            )));
        }
        if sampler.samples_per_pixel() == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }

        camera.initialize();
        Ok(Self {
            camera,
            film: Film::new(resolution.x, resolution.y),
            sampler,
            config,
            progress: Box::new(SilentProgress),
        })
    }

    /// Report finished rows to `progress`.
    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn film(&self) -> &Film {
        &self.film
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every row on the calling thread with the master sampler.
    pub fn render<I: Integrator + ?Sized>(&mut self, integrator: &I, scene: &Scene) -> Result<()> {
        self.log_start("sequential", 1, scene);
        let start = Instant::now();

        let height = self.film.height();
        self.progress.begin(height);
        let job = RowJob {
            camera: &self.camera,
            integrator,
            scene,
            max_depth: self.config.max_depth,
            row_order: self.config.row_order,
            progress: self.progress.as_ref(),
        };
        job.run(self.film.all_rows_mut(), self.sampler.as_mut());
        self.progress.finish();

        log::info!("Rendered {} rows in {:.2?}", height, start.elapsed());
        self.write_output()
    }

    /// Render with one worker per contiguous row band.
    ///
    /// Each worker gets its own clone of the sampler, so the result matches
    /// [`render`](Self::render) pixel for pixel.
    pub fn multi_render<I: Integrator + ?Sized>(
        &mut self,
        integrator: &I,
        scene: &Scene,
    ) -> Result<()> {
        let height = self.film.height();
        let threads = self.config.thread_count().min(height as usize).max(1);
        self.log_start("parallel", threads, scene);
        let start = Instant::now();

        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        let ranges = partition_rows(height, threads);

        self.progress.begin(height);
        let job = RowJob {
            camera: &self.camera,
            integrator,
            scene,
            max_depth: self.config.max_depth,
            row_order: self.config.row_order,
            progress: self.progress.as_ref(),
        };
        // Samplers are Send but not Sync, so clone them before entering the pool
        let work: Vec<_> = self
            .film
            .rows_mut(&ranges)
            .into_iter()
            .map(|band| (band, self.sampler.clone_box()))
            .collect();

        pool.scope(|s| {
            for (band, mut sampler) in work {
                let job = &job;
                s.spawn(move |_| {
                    log::debug!("Worker started on rows {:?}", band.rows());
                    job.run(band, sampler.as_mut());
                });
            }
        });
        self.progress.finish();

        log::info!(
            "Rendered {} rows on {} threads in {:.2?}",
            height,
            threads,
            start.elapsed()
        );
        self.write_output()
    }

    fn log_start(&self, mode: &str, threads: usize, scene: &Scene) {
        log::info!(
            "Starting {} render: {}x{}, {} spp, max depth {}, {} thread(s)",
            mode,
            self.film.width(),
            self.film.height(),
            self.sampler.samples_per_pixel(),
            self.config.max_depth,
            threads
        );
        if scene.lights().is_empty() {
            log::warn!("Scene has no lights; only the sky will contribute");
        }
    }

    fn write_output(&self) -> Result<()> {
        match &self.config.output {
            Some(path) => self.film.write_file(path),
            None => Ok(()),
        }
    }
}

/// Everything a worker needs to fill its band, shared read-only.
struct RowJob<'a, I: ?Sized> {
    camera: &'a Camera,
    integrator: &'a I,
    scene: &'a Scene,
    max_depth: u32,
    row_order: RowOrder,
    progress: &'a dyn Progress,
}

impl<I: Integrator + ?Sized> RowJob<'_, I> {
    fn run(&self, mut band: FilmRows<'_>, sampler: &mut dyn Sampler) {
        let rows = band.rows();
        let width = band.width();
        let spp = sampler.samples_per_pixel();

        let mut render_row = |y: u32| {
            for x in 0..width {
                let pixel = UVec2::new(x, y);
                sampler.start_pixel(pixel);

                let mut sum = Color::ZERO;
                for _ in 0..spp {
                    let ray = self.camera.generate_ray(sampler.get_2d(), pixel);
                    sum += self.integrator.li(ray, self.scene, self.max_depth, sampler);
                }
                band.write_color(sum / spp as f32, pixel);
            }
            self.progress.row_done(y);
        };

        match self.row_order {
            RowOrder::TopDown => (rows.start..rows.end).for_each(&mut render_row),
            RowOrder::BottomUp => (rows.start..rows.end).rev().for_each(&mut render_row),
        }
    }
}
