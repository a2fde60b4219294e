//! Whitted-style recursive ray caster.
//!
//! Every call finds the nearest object along a ray, lights it with the scene's
//! point light (Lambert diffuse plus Phong specular, scaled by the shadow
//! test), and blends in recursively traced reflection and refraction rays.
//! Rays that escape, or that exceed the depth budget, take the skybox color.
//!
//! The tracer only reads the scene, skybox and textures, so any number of
//! rays may be traced against one `Tracer` without synchronization.

use glam::Vec3A;

use crate::error::{RenderError, Result};
use crate::hittable::Intersect;
use crate::material::{reflect, refract, Color};
use crate::ray::Ray;
use crate::scene::Scene;
use crate::shadow::cast_shadow;
use crate::skybox::Skybox;
use crate::texture::TextureProvider;

/// Recursion depth at which rays stop bouncing.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Offset of secondary ray origins from the surface they leave.
pub const DEFAULT_BIAS: f32 = 1e-4;

/// Tuning of the recursive tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSettings {
    /// Depth at which a ray returns the skybox color instead of shading.
    pub max_depth: u32,
    /// Distance secondary ray origins are pushed off the surface.
    pub bias: f32,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            bias: DEFAULT_BIAS,
        }
    }
}

/// Ray caster bound to one scene, skybox and texture set.
pub struct Tracer<'a> {
    scene: &'a Scene,
    skybox: &'a Skybox,
    textures: &'a dyn TextureProvider,
    settings: TraceSettings,
}

impl<'a> Tracer<'a> {
    /// Bind a tracer to its inputs.
    ///
    /// Fails with [`RenderError::MissingAsset`] if the scene or the skybox
    /// names a texture the provider does not have, so no ray ever meets a
    /// missing texture mid-frame.
    pub fn new(
        scene: &'a Scene,
        skybox: &'a Skybox,
        textures: &'a dyn TextureProvider,
        settings: TraceSettings,
    ) -> Result<Self> {
        scene.validate(textures)?;
        if let Some(key) = skybox.keys().into_iter().find(|k| !textures.contains(k)) {
            return Err(RenderError::MissingAsset(key.to_string()));
        }
        Ok(Self {
            scene,
            skybox,
            textures,
            settings,
        })
    }

    pub fn settings(&self) -> TraceSettings {
        self.settings
    }

    /// Color of a primary ray.
    pub fn trace(&self, origin: Vec3A, direction: Vec3A) -> Result<Color> {
        self.cast_ray(origin, direction, 0, None)
    }

    /// Nearest object hit by `ray`, skipping the object at `exclude`.
    ///
    /// Ties keep the object that comes first in the scene.
    fn nearest_hit(&self, ray: &Ray, exclude: Option<usize>) -> Option<(usize, Intersect)> {
        self.scene
            .objects
            .iter()
            .enumerate()
            .filter(|&(index, _)| Some(index) != exclude)
            .filter_map(|(index, object)| object.intersect(ray).map(|hit| (index, hit)))
            .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
    }

    /// Color seen along a ray at recursion level `depth`.
    ///
    /// `exclude` is the object the ray just left, if any.
    pub fn cast_ray(
        &self,
        origin: Vec3A,
        direction: Vec3A,
        depth: u32,
        exclude: Option<usize>,
    ) -> Result<Color> {
        let ray = Ray::new(origin, direction);

        let nearest = if depth >= self.settings.max_depth || ray.is_degenerate() {
            None
        } else {
            self.nearest_hit(&ray, exclude)
        };
        let Some((index, hit)) = nearest else {
            return self.skybox.color(&ray, self.textures);
        };

        let object = &self.scene.objects[index];
        let hit = object.colorize(hit, self.textures)?;
        let material = &object.material;
        let light = &self.scene.light;
        let normal = hit.normal;

        let light_dir = (light.position - hit.point).normalize_or_zero();
        let view_dir = (origin - hit.point).normalize_or_zero();
        // Mirrors the ray origin's position vector, not the incoming direction.
        let reflect_dir = reflect(-origin.normalize_or_zero(), normal);

        let shadow = cast_shadow(&self.scene.objects, light, hit.point, light_dir, index);

        let diffuse_intensity = normal.dot(light_dir).max(0.0);
        let specular_intensity = view_dir
            .dot(reflect_dir)
            .max(0.0)
            .powf(material.specular_exponent);

        let reflected = if material.reflectivity > 0.0 {
            let bounce_origin = hit.point + normal * self.settings.bias;
            self.cast_ray(bounce_origin, reflect_dir, depth + 1, Some(index))?
        } else {
            Color::ZERO
        };

        let refracted = if material.transparency > 0.0 {
            let bounce_origin = hit.point - normal * self.settings.bias;
            let refract_dir = refract(direction, normal, material.refraction_index);
            self.cast_ray(bounce_origin, refract_dir, depth + 1, Some(index))?
        } else {
            Color::ZERO
        };

        let base = hit.color.unwrap_or(material.diffuse);
        let diffuse = base * light.intensity * diffuse_intensity * material.albedo * shadow;
        let specular =
            light.color * light.intensity * specular_intensity * material.specular_albedo * shadow;

        Ok((diffuse + specular) * (1.0 - material.reflectivity - material.transparency)
            + reflected * material.reflectivity
            + refracted * material.transparency)
    }
}
