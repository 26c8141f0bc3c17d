//! Built-in scenes selectable from the command line.

use lumen_math::Vec3;
use lumen_renderer::{
    Camera, Color, MaterialParams, Quad, QuadLight, Scene, SceneBuilder, Sphere, SphereLight,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// A single glowing sphere against the sky
    EmissiveSphere,
    /// Closed box with colored walls and a ceiling light
    Cornell,
    /// Diffuse, metal and glass spheres on a ground plane
    #[default]
    Spheres,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [
        SceneKind::EmissiveSphere,
        SceneKind::Cornell,
        SceneKind::Spheres,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::EmissiveSphere => "emissive-sphere",
            SceneKind::Cornell => "cornell",
            SceneKind::Spheres => "spheres",
        }
    }

    /// Build the scene and a camera framing it; resolution is left to the caller.
    pub fn build(self) -> (Scene, Camera) {
        match self {
            SceneKind::EmissiveSphere => emissive_sphere(),
            SceneKind::Cornell => cornell(),
            SceneKind::Spheres => spheres(),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                format!("unknown scene '{s}' (expected one of: emissive-sphere, cornell, spheres)")
            })
    }
}

fn emissive_sphere() -> (Scene, Camera) {
    let mut builder = SceneBuilder::new();
    builder.add_sphere_light(
        SphereLight::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0), Color::splat(4.0)),
        MaterialParams::diffuse(Color::splat(0.8)),
    );

    let camera = Camera::new()
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_fov(60.0);
    (builder.build(), camera)
}

fn cornell() -> (Scene, Camera) {
    let white = MaterialParams::diffuse(Color::splat(0.73));
    let red = MaterialParams::diffuse(Color::new(0.65, 0.05, 0.05));
    let green = MaterialParams::diffuse(Color::new(0.12, 0.45, 0.15));

    let mut builder = SceneBuilder::new();

    // Box spans x in [-1, 1], y in [0, 2], z in [-2, 0]
    builder
        .add(
            Quad::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 2.0, 0.0)),
            red,
        )
        .add(
            Quad::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -2.0)),
            green,
        )
        .add(
            Quad::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.0)),
            white,
        )
        .add(
            Quad::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -2.0), Vec3::new(2.0, 0.0, 0.0)),
            white,
        )
        .add(
            Quad::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(0.0, 2.0, 0.0), Vec3::new(2.0, 0.0, 0.0)),
            white,
        );

    // Faces down into the box
    builder.add_quad_light(
        QuadLight::new(
            Quad::new(
                Vec3::new(-0.3, 1.98, -1.3),
                Vec3::new(0.6, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.6),
            ),
            Color::splat(15.0),
        ),
        white,
    );

    builder
        .add(
            Sphere::new(Vec3::new(-0.4, 0.35, -1.3), 0.35),
            MaterialParams::metal(Color::splat(0.9), 0.05),
        )
        .add(
            Sphere::new(Vec3::new(0.45, 0.35, -0.8), 0.35),
            MaterialParams::glass(Color::ONE, 1.5),
        );

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 1.0, 2.6), Vec3::new(0.0, 1.0, -1.0), Vec3::Y)
        .with_fov(40.0);
    (builder.build(), camera)
}

fn spheres() -> (Scene, Camera) {
    let mut builder = SceneBuilder::new();
    builder
        .add(
            Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0),
            MaterialParams::diffuse(Color::new(0.8, 0.8, 0.0)),
        )
        .add(
            Sphere::new(Vec3::new(0.0, 0.0, -1.2), 0.5),
            MaterialParams::plastic(Color::new(0.1, 0.2, 0.5), 0.3),
        )
        .add(
            Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5),
            MaterialParams::glass(Color::ONE, 1.5),
        )
        .add(
            Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5),
            MaterialParams::metal(Color::new(0.8, 0.6, 0.2), 0.1),
        );
    builder.add_sphere_light(
        SphereLight::new(
            Sphere::new(Vec3::new(0.0, 2.0, -0.5), 0.4),
            Color::splat(8.0),
        ),
        MaterialParams::diffuse(Color::ONE),
    );

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 0.5, 1.5), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_fov(60.0);
    (builder.build(), camera)
}
