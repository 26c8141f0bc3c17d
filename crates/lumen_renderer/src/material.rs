//! Surface material parameters shared by all shading models.

use lumen_math::Vec3;

/// Color type alias (linear RGB, typically 0-1 but unbounded for emitters)
pub type Color = Vec3;

/// Roughness at or below which a lobe is treated as a perfect mirror.
pub const DELTA_ROUGHNESS: f32 = 0.01;

/// Principled material parameters carried by every surface hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// Base color (albedo for dielectrics, reflectance for metals)
    pub base_color: Color,
    /// Metallic: 0 = dielectric, 1 = metal
    pub metallic: f32,
    /// Specular transmission: 0 = opaque, 1 = fully transmissive
    pub spec_trans: f32,
    /// Roughness: 0 = smooth/mirror, 1 = rough
    pub roughness: f32,
    /// Specular: dielectric Fresnel reflectance at normal incidence, scaled by 0.08
    pub specular: f32,
    /// Index of refraction for the transmission lobe
    pub ior: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            base_color: Color::new(0.8, 0.8, 0.8),
            metallic: 0.0,
            spec_trans: 0.0,
            roughness: 0.5,
            specular: 0.5,
            ior: 1.5,
        }
    }
}

impl MaterialParams {
    /// A purely diffuse material.
    pub fn diffuse(color: Color) -> Self {
        Self {
            base_color: color,
            roughness: 1.0,
            specular: 0.0,
            ..Default::default()
        }
    }

    /// A metallic material.
    pub fn metal(color: Color, roughness: f32) -> Self {
        Self {
            base_color: color,
            metallic: 1.0,
            roughness: roughness.clamp(0.0, 1.0),
            specular: 1.0,
            ..Default::default()
        }
    }

    /// A smooth glass-like material.
    pub fn glass(color: Color, ior: f32) -> Self {
        Self {
            base_color: color,
            spec_trans: 1.0,
            roughness: 0.0,
            ior,
            ..Default::default()
        }
    }

    /// A diffuse base with a glossy dielectric coat.
    pub fn plastic(color: Color, roughness: f32) -> Self {
        Self {
            base_color: color,
            roughness: roughness.clamp(0.0, 1.0),
            specular: 0.5,
            ..Default::default()
        }
    }

    /// Weight of the diffuse lobe, `(1 - metallic) * (1 - spec_trans)`.
    #[inline]
    pub fn diffuse_weight(&self) -> f32 {
        (1.0 - self.metallic) * (1.0 - self.spec_trans)
    }

    /// True when the surface scatters into a single direction.
    ///
    /// A surface with no diffuse lobe left (fully metallic or fully
    /// transmissive) and a mirror-smooth finish has no continuous density
    /// that explicit light sampling could hit.
    pub fn is_delta_like(&self) -> bool {
        self.diffuse_weight() == 0.0 && self.roughness <= DELTA_ROUGHNESS
    }
}
