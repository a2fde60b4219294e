//! Scene description consumed by the tracer.
//!
//! A scene is an ordered list of objects plus one point light. Order matters
//! only to the shadow test, which stops at the first blocker it meets.

use glam::Vec3A;
use log::warn;

use crate::cuboid::Cuboid;
use crate::error::{RenderError, Result};
use crate::hittable::{Hittable, Intersect};
use crate::material::{rgb8, Color, Material};
use crate::ray::Ray;
use crate::skin::Skin;
use crate::sphere::Sphere;
use crate::texture::TextureProvider;

/// Point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3A,
    pub intensity: f32,
    pub color: Color,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3A::new(-10.0, 10.0, 20.0),
            intensity: 1.0,
            color: rgb8(255, 0, 0),
        }
    }
}

/// Box geometry dressed in a texture skin.
struct SkinnedBox {
    cuboid: Cuboid,
    skin: Skin,
}

/// Geometry of a scene object.
enum Shape {
    Plain(Box<dyn Hittable>),
    Skinned(SkinnedBox),
}

/// A primitive together with its material.
pub struct SceneObject {
    shape: Shape,
    pub material: Material,
}

impl SceneObject {
    /// Any geometry without texturing.
    pub fn new(shape: Box<dyn Hittable>, material: Material) -> Self {
        Self {
            shape: Shape::Plain(shape),
            material,
        }
    }

    pub fn sphere(center: Vec3A, radius: f32, material: Material) -> Self {
        Self::new(Box::new(Sphere::new(center, radius)), material)
    }

    pub fn cuboid(min: Vec3A, max: Vec3A, material: Material) -> Self {
        Self::new(Box::new(Cuboid::new(min, max)), material)
    }

    /// Box whose faces are colored by `skin`.
    pub fn skinned(min: Vec3A, max: Vec3A, skin: Skin, material: Material) -> Self {
        Self {
            shape: Shape::Skinned(SkinnedBox {
                cuboid: Cuboid::new(min, max),
                skin,
            }),
            material,
        }
    }

    pub fn skin(&self) -> Option<&Skin> {
        match &self.shape {
            Shape::Skinned(b) => Some(&b.skin),
            Shape::Plain(_) => None,
        }
    }

    /// Geometry-only hit, used for nearest-hit search and shadow rays.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersect> {
        match &self.shape {
            Shape::Plain(shape) => shape.intersect(ray),
            Shape::Skinned(b) => b.cuboid.intersect(ray),
        }
    }

    /// Attach the texture color of the hit surface, if the object has one.
    pub fn colorize(&self, mut hit: Intersect, textures: &dyn TextureProvider) -> Result<Intersect> {
        if let Shape::Skinned(b) = &self.shape {
            hit.color = b.skin.color_at(&b.cuboid, hit.point, textures)?;
        }
        Ok(hit)
    }
}

/// Objects and light of one render.
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub light: Light,
}

impl Scene {
    pub fn new(light: Light) -> Self {
        Self {
            objects: Vec::new(),
            light,
        }
    }

    pub fn push(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Check the scene against the texture store before any ray is cast.
    ///
    /// Fails on the first texture key no store entry answers to. Materials
    /// whose reflectivity and transparency add up past 1 are accepted as-is
    /// and only reported.
    pub fn validate(&self, textures: &dyn TextureProvider) -> Result<()> {
        for (index, object) in self.objects.iter().enumerate() {
            if let Some(skin) = object.skin() {
                if let Some(key) = skin.keys().find(|k| !textures.contains(k)) {
                    return Err(RenderError::MissingAsset(key.to_string()));
                }
            }
            if object.material.is_over_budget() {
                warn!(
                    "Object {} has reflectivity + transparency = {:.2} (> 1); local shading gets a negative weight",
                    index,
                    object.material.energy_budget()
                );
            }
        }
        Ok(())
    }

    /// The nether-portal diorama: netherrack terraces, stone stairs and
    /// pillars, an obsidian frame holding a portal pane, and gold and diamond
    /// blocks behind it.
    pub fn diorama(light: Light) -> Self {
        let v = Vec3A::new;
        let mut scene = Self::new(light);

        let netherrack = |min, max| {
            SceneObject::skinned(min, max, Skin::grass_block(), Material::netherrack())
        };
        let stone = |min, max| SceneObject::skinned(min, max, Skin::uniform("stone"), Material::stone());
        let gold = |min, max| SceneObject::skinned(min, max, Skin::uniform("gold"), Material::gold());
        let obsidian =
            |min, max| SceneObject::skinned(min, max, Skin::uniform("obsidian"), Material::obsidian());

        scene.push(netherrack(v(-1.5, -0.5, -1.0), v(3.0, 0.0, -4.0)));
        scene.push(netherrack(v(-2.0, -1.5, 0.0), v(3.5, -1.0, -4.0)));
        scene.push(netherrack(v(-2.0, -1.0, -1.5), v(3.5, -0.5, -4.0)));

        scene.push(stone(v(-1.5, -1.0, 0.0), v(3.0, -0.75, -1.0)));
        scene.push(stone(v(-1.5, -0.75, -0.25), v(3.0, -0.5, -1.0)));
        scene.push(stone(v(-1.5, -0.5, -0.5), v(3.0, -0.25, -1.0)));
        scene.push(stone(v(-1.0, -0.25, -0.75), v(2.5, 0.0, -1.0)));

        scene.push(stone(v(3.0, -1.0, -0.5), v(3.5, -0.75, -0.75)));
        scene.push(stone(v(3.0, -1.0, -0.75), v(3.5, -0.5, -1.0)));
        scene.push(stone(v(3.0, -1.0, -1.0), v(3.5, 2.0, -1.5)));

        scene.push(stone(v(-2.0, -1.0, -0.5), v(-1.5, -0.75, -0.75)));
        scene.push(stone(v(-2.0, -1.0, -0.75), v(-1.5, -0.5, -1.0)));
        scene.push(stone(v(-2.0, -1.0, -1.0), v(-1.5, 3.5, -1.5)));

        scene.push(stone(v(-2.0, 3.0, -1.0), v(0.0, 3.5, -1.5)));
        scene.push(stone(v(-2.0, 2.5, -1.0), v(-1.0, 3.0, -1.5)));

        scene.push(gold(v(0.0, 3.0, -1.0), v(1.0, 3.5, -1.5)));

        scene.push(obsidian(v(0.0, 0.0, -1.0), v(1.5, 0.5, -1.5)));
        scene.push(obsidian(v(-0.5, 0.5, -1.0), v(0.0, 2.5, -1.5)));
        scene.push(obsidian(v(1.5, 0.5, -1.0), v(2.0, 2.5, -1.5)));
        scene.push(obsidian(v(0.0, 2.5, -1.0), v(1.5, 3.0, -1.5)));

        scene.push(SceneObject::skinned(
            v(0.0, 0.5, -1.0),
            v(1.5, 2.5, -1.5),
            Skin::uniform("portal"),
            Material::portal(),
        ));

        scene.push(gold(v(-1.5, 0.0, -3.0), v(0.5, 2.1, -4.0)));

        scene.push(SceneObject::skinned(
            v(1.0, 0.0, -3.0),
            v(3.0, 2.1, -4.0),
            Skin::uniform("diamond"),
            Material::diamond(),
        ));

        scene
    }

    /// Texture keys the diorama samples.
    pub const DIORAMA_TEXTURES: [&'static str; 7] =
        ["grass", "netherrack", "stone", "gold", "obsidian", "portal", "diamond"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture, TextureStore};

    fn full_store() -> TextureStore {
        let mut store = TextureStore::new();
        for key in Scene::DIORAMA_TEXTURES {
            store.insert(key, Texture::solid([50, 60, 70]));
        }
        store
    }

    #[test]
    fn test_diorama_layout() {
        let scene = Scene::diorama(Light::default());
        assert_eq!(scene.objects.len(), 23);
        assert!(scene.objects.iter().all(|o| o.skin().is_some()));
        assert_eq!(scene.objects[21].material, Material::gold());
    }

    #[test]
    fn test_validate_accepts_complete_store() {
        let scene = Scene::diorama(Light::default());
        assert!(scene.validate(&full_store()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let scene = Scene::diorama(Light::default());
        let mut store = TextureStore::new();
        store.insert("grass", Texture::solid([0, 0, 0]));
        let err = scene.validate(&store).unwrap_err();
        assert!(matches!(err, RenderError::MissingAsset(ref k) if k == "netherrack"));
    }

    #[test]
    fn test_validate_accepts_over_budget_material() {
        let mut scene = Scene::new(Light::default());
        let material = Material {
            reflectivity: 0.9,
            transparency: 0.9,
            ..Material::stone()
        };
        scene.push(SceneObject::sphere(Vec3A::ZERO, 1.0, material));
        assert!(scene.validate(&TextureStore::new()).is_ok());
        assert_eq!(scene.objects[0].material.reflectivity, 0.9);
    }

    #[test]
    fn test_colorize_plain_object_keeps_material() {
        let object = SceneObject::cuboid(Vec3A::splat(-1.0), Vec3A::splat(1.0), Material::stone());
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), -Vec3A::Z);
        let hit = object.intersect(&ray).expect("hit");
        let hit = object.colorize(hit, &TextureStore::new()).unwrap();
        assert!(!hit.has_color());
    }

    #[test]
    fn test_colorize_skinned_object() {
        let object = SceneObject::skinned(
            Vec3A::splat(-1.0),
            Vec3A::splat(1.0),
            Skin::uniform("stone"),
            Material::stone(),
        );
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), -Vec3A::Z);
        let hit = object.intersect(&ray).expect("hit");
        let hit = object.colorize(hit, &full_store()).unwrap();
        assert_eq!(hit.color, Some(rgb8(50, 60, 70)));
    }
}
