use super::{sky_gradient, Integrator};
use crate::{
    bsdf::Bsdf, interaction::SurfaceInteraction, sampling::balance_heuristic, Color, Principled,
    Ray, Sampler, Scene,
};
use lumen_math::Vec3;

/// Gap left between the end of a shadow ray and the light it aims at.
pub const SHADOW_CLEARANCE: f32 = 0.01;

/// Unidirectional path tracer with next-event estimation.
///
/// BSDF sampling and single-light sampling are combined with the balance
/// heuristic. Paths are cut at the depth limit without Russian roulette.
#[derive(Debug, Clone, Default)]
pub struct PathIntegrator<B = Principled> {
    bsdf: B,
}

impl<B: Bsdf> PathIntegrator<B> {
    pub fn new(bsdf: B) -> Self {
        Self { bsdf }
    }

    /// Direct light through one uniformly chosen emitter, weighted against
    /// the BSDF density of the same direction.
    fn sample_one_light(
        &self,
        si: &SurfaceInteraction,
        origin: Vec3,
        wo: Vec3,
        scene: &Scene,
        sampler: &mut dyn Sampler,
    ) -> Color {
        let lights = scene.lights();
        let light_count = lights.len();
        let index = ((sampler.get_1d() * light_count as f32) as usize).min(light_count - 1);
        let ls = lights[index].sample_incident(si.p, sampler.get_2d());
        if ls.is_degenerate {
            return Color::ZERO;
        }

        let shadow_ray = Ray::bounded(origin, ls.wi, ls.distance - SHADOW_CLEARANCE);
        if scene.intersect_p(&shadow_ray) {
            return Color::ZERO;
        }

        let (f, bsdf_pdf) = self.bsdf.evaluate(si, ls.wi, wo);
        let pdf_sum = bsdf_pdf + ls.pdf;
        if pdf_sum <= 0.0 {
            return Color::ZERO;
        }
        f * ls.emittance / pdf_sum * light_count as f32
    }
}

impl<B: Bsdf> Integrator for PathIntegrator<B> {
    fn li(&self, ray: Ray, scene: &Scene, max_depth: u32, sampler: &mut dyn Sampler) -> Color {
        let mut radiance = Color::ZERO;
        let mut throughput = Color::ONE;
        let mut ray = ray;
        // Camera rays count as delta samples so directly visible lights are unweighted
        let mut prev_pdf = 0.0;
        let mut prev_delta = true;
        let light_count = scene.lights().len() as f32;

        for _ in 0..max_depth {
            let Some(si) = scene.intersect(&ray) else {
                return radiance + throughput * sky_gradient(ray.direction);
            };

            let wo = -ray.direction.normalize();
            let u_lobe = sampler.get_1d();
            let bs = self.bsdf.sample(&si, wo, u_lobe, sampler.get_2d());
            if bs.is_degenerate {
                return radiance;
            }

            let origin = si.offset_origin(bs.below_surface);

            if let Some(light) = si.light {
                // One-sided: emitters only shine from the outside
                if wo.dot(si.n) >= 0.0 {
                    let weight = if prev_delta {
                        1.0
                    } else {
                        balance_heuristic(prev_pdf, light.pdf(ray.direction, ray.origin, si.p))
                    };
                    radiance += throughput * light.emittance() * weight * light_count;
                }
                return radiance;
            }

            if !scene.lights().is_empty() && !si.material.is_delta_like() {
                radiance += throughput * self.sample_one_light(&si, origin, wo, scene, sampler);
            }

            throughput *= bs.weight;
            prev_pdf = bs.pdf;
            prev_delta = bs.is_delta;
            ray = Ray::new(origin, bs.wi);
        }

        radiance
    }
}
