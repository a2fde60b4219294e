//! Surface materials for Whitted-style shading.
//!
//! A material weighs four contributions: Lambert diffuse, Phong specular, a
//! mirror-reflected ray and a refracted ray. Presets reproduce the block
//! types of the diorama scene.

use glam::Vec3A;

/// Linear RGB color, one channel per lane on a [0, 1] scale.
///
/// Shading arithmetic never clamps; channels are clamped when written out.
pub type Color = Vec3A;

/// Build a color from 8-bit channels.
pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32, g as f32, b as f32) / 255.0
}

/// Surface response to the scene light and to secondary rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color, used when the hit carries no texture color.
    pub diffuse: Color,
    /// Weight of the diffuse term.
    pub albedo: f32,
    /// Weight of the specular highlight.
    pub specular_albedo: f32,
    /// Phong exponent of the specular highlight.
    pub specular_exponent: f32,
    /// Weight of the recursively traced mirror reflection, in [0, 1].
    pub reflectivity: f32,
    /// Weight of the recursively traced refraction, in [0, 1].
    pub transparency: f32,
    /// Ratio handed to the refraction formula as-is.
    pub refraction_index: f32,
}

impl Material {
    /// Opaque matte material with unit albedo and no highlight.
    pub fn matte(diffuse: Color) -> Self {
        Self {
            diffuse,
            albedo: 1.0,
            specular_albedo: 0.0,
            specular_exponent: 0.0,
            reflectivity: 0.0,
            transparency: 0.0,
            refraction_index: 1.0,
        }
    }

    /// Perfect mirror: every bit of the local term is replaced by the
    /// reflected ray.
    pub fn mirror() -> Self {
        Self {
            reflectivity: 1.0,
            ..Self::matte(Color::ZERO)
        }
    }

    /// Combined weight of the secondary rays.
    pub fn energy_budget(&self) -> f32 {
        self.reflectivity + self.transparency
    }

    /// True when secondary rays claim more than the whole color. Such a
    /// material gives the local term a negative weight; it is rendered
    /// unchanged.
    pub fn is_over_budget(&self) -> bool {
        self.energy_budget() > 1.0
    }

    /// Glossy black volcanic glass.
    pub fn obsidian() -> Self {
        Self {
            diffuse: rgb8(0, 0, 0),
            albedo: 0.8,
            specular_albedo: 0.0,
            specular_exponent: 1000.0,
            reflectivity: 0.2,
            transparency: 0.0,
            refraction_index: 1.0,
        }
    }

    /// Translucent purple portal pane.
    pub fn portal() -> Self {
        Self {
            diffuse: rgb8(128, 0, 128),
            albedo: 1.0,
            specular_albedo: 1.0,
            specular_exponent: 0.9,
            reflectivity: 0.1,
            transparency: 0.5,
            refraction_index: 1.5,
        }
    }

    pub fn gold() -> Self {
        Self {
            diffuse: rgb8(255, 215, 0),
            albedo: 1.0,
            specular_albedo: 8.0,
            specular_exponent: 0.4,
            reflectivity: 0.6,
            transparency: 0.0,
            refraction_index: 1.5,
        }
    }

    pub fn diamond() -> Self {
        Self {
            diffuse: rgb8(127, 213, 240),
            albedo: 1.0,
            specular_albedo: 10.0,
            specular_exponent: 0.8,
            reflectivity: 0.8,
            transparency: 0.0,
            refraction_index: 2.4,
        }
    }

    pub fn netherrack() -> Self {
        Self {
            diffuse: rgb8(153, 25, 25),
            albedo: 1.0,
            specular_albedo: 0.5,
            specular_exponent: 0.3,
            reflectivity: 0.1,
            transparency: 0.0,
            refraction_index: 1.0,
        }
    }

    pub fn stone() -> Self {
        Self::matte(rgb8(128, 128, 128))
    }
}

/// Mirror `v` about the plane with unit normal `n`.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Bend the unit incident direction `i` through the surface with unit normal
/// `n` by the index ratio `eta` (Snell's law).
///
/// Returns the zero vector on total internal reflection.
pub fn refract(i: Vec3A, n: Vec3A, eta: f32) -> Vec3A {
    let cos_i = n.dot(i);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        Vec3A::ZERO
    } else {
        eta * i - (eta * cos_i + k.sqrt()) * n
    }
}
