//! Principled BSDF, a reduced form of the Disney model.
//!
//! Based on the 2012 Disney paper "Physically Based Shading at Disney"
//! and the 2015 extension for specular transmission. Three lobes:
//! - Burley diffuse, weighted by `(1 - metallic) * (1 - spec_trans)`
//! - GGX specular reflection, a perfect mirror when the roughness is at or
//!   below [`DELTA_ROUGHNESS`]
//! - smooth dielectric transmission, weighted by `(1 - metallic) * spec_trans`

use crate::{
    bsdf::{Bsdf, BsdfSample},
    interaction::SurfaceInteraction,
    material::{MaterialParams, DELTA_ROUGHNESS},
    sampling::{cosine_hemisphere_pdf, cosine_sample_hemisphere, to_world},
    Color,
};
use lumen_math::{orthonormal_basis, Vec2, Vec3};
use std::f32::consts::PI;

/// Principled BSDF driven by the [`MaterialParams`] of each hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Principled;

impl Principled {
    pub fn new() -> Self {
        Self
    }
}

/// Lobe selection probabilities for one material.
#[derive(Debug, Clone, Copy)]
struct Lobes {
    diffuse: f32,
    specular: f32,
    transmission: f32,
}

impl Lobes {
    /// None when the material scatters nothing at all.
    fn new(params: &MaterialParams) -> Option<Self> {
        let diffuse = params.diffuse_weight();
        let transmission = (1.0 - params.metallic) * params.spec_trans;
        let specular = params.metallic + diffuse * params.specular * 0.5;

        let total = diffuse + specular + transmission;
        if total <= 0.0 {
            return None;
        }

        Some(Self {
            diffuse: diffuse / total,
            specular: specular / total,
            transmission: transmission / total,
        })
    }
}

impl Bsdf for Principled {
    fn sample(&self, si: &SurfaceInteraction, wo: Vec3, u_lobe: f32, u: Vec2) -> BsdfSample {
        let params = &si.material;
        let Some(lobes) = Lobes::new(params) else {
            return BsdfSample::degenerate();
        };
        let n = si.facing(wo);

        let mut sample = if u_lobe < lobes.transmission {
            sample_transmission(params, lobes.transmission, si.n, wo, u.x)
        } else if u_lobe < lobes.transmission + lobes.specular {
            if params.roughness <= DELTA_ROUGHNESS {
                sample_mirror(params, lobes.specular, n, wo)
            } else {
                let h = sample_ggx(n, ggx_alpha(params.roughness), u);
                continuous_sample(params, &lobes, n, wo, reflect(-wo, h))
            }
        } else {
            let wi = to_world(cosine_sample_hemisphere(u), n);
            continuous_sample(params, &lobes, n, wo, wi)
        };

        if !sample.is_degenerate {
            sample.below_surface = sample.wi.dot(si.n) < 0.0;
        }
        sample
    }

    fn evaluate(&self, si: &SurfaceInteraction, wi: Vec3, wo: Vec3) -> (Color, f32) {
        match Lobes::new(&si.material) {
            Some(lobes) => eval_continuous(&si.material, &lobes, si.facing(wo), wo, wi),
            None => (Color::ZERO, 0.0),
        }
    }
}

/// Value and mixture density of the non-delta lobes.
fn eval_continuous(
    params: &MaterialParams,
    lobes: &Lobes,
    n: Vec3,
    wo: Vec3,
    wi: Vec3,
) -> (Color, f32) {
    let n_dot_l = n.dot(wi);
    let n_dot_v = n.dot(wo);
    if n_dot_l <= 0.0 || n_dot_v <= 0.0 {
        return (Color::ZERO, 0.0);
    }

    let h = (wo + wi).normalize();
    let l_dot_h = wi.dot(h).max(0.0);

    let mut f = Color::ZERO;
    let mut pdf = 0.0;

    if lobes.diffuse > 0.0 {
        // Burley 2012 retro-reflective diffuse
        let fd90 = 0.5 + 2.0 * params.roughness * l_dot_h * l_dot_h;
        let fd = lerp(1.0, fd90, schlick_weight(n_dot_l)) * lerp(1.0, fd90, schlick_weight(n_dot_v));

        f += params.diffuse_weight() * params.base_color * fd / PI;
        pdf += lobes.diffuse * cosine_hemisphere_pdf(n_dot_l);
    }

    if lobes.specular > 0.0 && params.roughness > DELTA_ROUGHNESS {
        let alpha = ggx_alpha(params.roughness);
        let n_dot_h = n.dot(h).max(0.0);
        let d = ggx_d(n_dot_h, alpha);
        let g = smith_g_ggx(n_dot_l, n_dot_v, alpha);
        let fresnel = schlick_fresnel3(fresnel_0(params), l_dot_h);

        f += specular_scale(params) * fresnel * d * g / (4.0 * n_dot_l * n_dot_v);
        pdf += lobes.specular * d * n_dot_h / (4.0 * wo.dot(h).abs().max(1e-6));
    }

    (f * n_dot_l, pdf)
}

fn continuous_sample(
    params: &MaterialParams,
    lobes: &Lobes,
    n: Vec3,
    wo: Vec3,
    wi: Vec3,
) -> BsdfSample {
    let (f, pdf) = eval_continuous(params, lobes, n, wo, wi);
    if pdf <= 0.0 || f == Color::ZERO {
        return BsdfSample::degenerate();
    }

    BsdfSample {
        wi,
        weight: f / pdf,
        pdf,
        is_delta: false,
        is_degenerate: false,
        below_surface: false,
    }
}

fn sample_mirror(params: &MaterialParams, lobe_pdf: f32, n: Vec3, wo: Vec3) -> BsdfSample {
    let cos_theta = n.dot(wo);
    if cos_theta <= 0.0 {
        return BsdfSample::degenerate();
    }

    let fresnel = schlick_fresnel3(fresnel_0(params), cos_theta);
    BsdfSample {
        wi: reflect(-wo, n),
        weight: specular_scale(params) * fresnel / lobe_pdf,
        pdf: lobe_pdf,
        is_delta: true,
        is_degenerate: false,
        below_surface: false,
    }
}

/// Smooth dielectric: reflect or refract in proportion to Fresnel.
///
/// `outward` is the geometric normal, which decides whether the ray enters
/// or leaves the medium.
fn sample_transmission(
    params: &MaterialParams,
    lobe_pdf: f32,
    outward: Vec3,
    wo: Vec3,
    u: f32,
) -> BsdfSample {
    let entering = wo.dot(outward) > 0.0;
    let (n, eta) = if entering {
        (outward, params.ior)
    } else {
        (-outward, 1.0 / params.ior)
    };

    let cos_theta = n.dot(wo).min(1.0);
    let reflectance = fresnel_dielectric(cos_theta, eta);
    let wi = if u < reflectance {
        reflect(-wo, n)
    } else {
        refract(-wo, n, 1.0 / eta)
    };

    let weight = (1.0 - params.metallic) * params.spec_trans * params.base_color / lobe_pdf;
    BsdfSample {
        wi: wi.normalize(),
        weight,
        pdf: lobe_pdf,
        is_delta: true,
        is_degenerate: false,
        below_surface: false,
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Share of energy left for reflection after transmission takes its part.
#[inline]
fn specular_scale(params: &MaterialParams) -> f32 {
    1.0 - (1.0 - params.metallic) * params.spec_trans
}

/// Compute F0 (Fresnel at normal incidence) based on material parameters.
fn fresnel_0(params: &MaterialParams) -> Color {
    // specular=0.5 corresponds to IOR=1.5 (common glass/plastic)
    let dielectric_f0 = Color::splat(0.08 * params.specular);
    lerp3(dielectric_f0, params.base_color, params.metallic)
}

#[inline]
fn ggx_alpha(roughness: f32) -> f32 {
    (roughness * roughness).max(0.001)
}

/// Linear interpolation.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Linear interpolation for colors.
#[inline]
fn lerp3(a: Color, b: Color, t: f32) -> Color {
    a + t * (b - a)
}

/// Schlick weight for Fresnel.
#[inline]
fn schlick_weight(cos_theta: f32) -> f32 {
    let x = (1.0 - cos_theta).clamp(0.0, 1.0);
    let x2 = x * x;
    x2 * x2 * x // (1 - cos_theta)^5
}

/// Schlick Fresnel approximation.
#[inline]
fn schlick_fresnel3(f0: Color, cos_theta: f32) -> Color {
    f0 + (Color::ONE - f0) * schlick_weight(cos_theta)
}

/// Unpolarized Fresnel reflectance of a dielectric boundary.
///
/// `eta` is the ratio of the transmitted to the incident index.
fn fresnel_dielectric(cos_i: f32, eta: f32) -> f32 {
    let cos_i = cos_i.clamp(0.0, 1.0);
    let sin2_t = (1.0 - cos_i * cos_i) / (eta * eta);
    if sin2_t >= 1.0 {
        // Total internal reflection
        return 1.0;
    }

    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parallel = (eta * cos_i - cos_t) / (eta * cos_i + cos_t);
    let r_perpendicular = (cos_i - eta * cos_t) / (cos_i + eta * cos_t);
    0.5 * (r_parallel * r_parallel + r_perpendicular * r_perpendicular)
}

/// GGX/Trowbridge-Reitz distribution.
#[inline]
fn ggx_d(n_dot_h: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

/// Smith G for GGX.
#[inline]
fn smith_g_ggx(n_dot_l: f32, n_dot_v: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let g1_l = 2.0 * n_dot_l / (n_dot_l + (a2 + (1.0 - a2) * n_dot_l * n_dot_l).sqrt());
    let g1_v = 2.0 * n_dot_v / (n_dot_v + (a2 + (1.0 - a2) * n_dot_v * n_dot_v).sqrt());
    g1_l * g1_v
}

/// Sample GGX microfacet normal in world space, distributed as `D(h) * cos(h)`.
fn sample_ggx(n: Vec3, alpha: f32, u: Vec2) -> Vec3 {
    // Sample half vector in tangent space
    let theta = (alpha * u.x.sqrt() / (1.0 - u.x).sqrt()).atan();
    let phi = 2.0 * PI * u.y;

    let h_local = Vec3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());

    let (tangent, bitangent) = orthonormal_basis(n);
    h_local.x * tangent + h_local.y * bitangent + h_local.z * n
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface whose normal faces against it.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
