//! Environment box shown wherever a ray escapes the scene.
//!
//! The skybox is a huge axis-aligned box around the diorama. A ray leaving
//! the scene hits one of its faces, and the face's texture, stretched once
//! over the face, gives the ray's color.

use glam::Vec3A;

use crate::cuboid::{BoxFace, Cuboid};
use crate::error::Result;
use crate::material::{rgb8, Color};
use crate::ray::Ray;
use crate::texture::{sample_normalized, TextureProvider};

/// Textured environment box with a flat fallback color.
#[derive(Debug, Clone, PartialEq)]
pub struct Skybox {
    pub bounds: Cuboid,
    /// Texture of the four walls
    pub side: String,
    /// Texture of the `min.y` face
    pub floor: String,
    /// Texture of the `max.y` face
    pub ceiling: String,
    /// Color for rays that meet no face
    pub fallback: Color,
}

impl Default for Skybox {
    fn default() -> Self {
        Self {
            bounds: Cuboid::new(Vec3A::new(-100.0, -50.0, 100.0), Vec3A::new(100.0, 70.0, -100.0)),
            side: "sideSky".to_string(),
            floor: "floor".to_string(),
            ceiling: "upSky".to_string(),
            fallback: rgb8(173, 216, 230),
        }
    }
}

impl Skybox {
    fn key_for(&self, face: BoxFace) -> &str {
        match face {
            BoxFace::MinY => &self.floor,
            BoxFace::MaxY => &self.ceiling,
            _ => &self.side,
        }
    }

    /// Every texture key the skybox samples.
    pub fn keys(&self) -> [&str; 3] {
        [&self.side, &self.floor, &self.ceiling]
    }

    /// Environment color seen along a ray.
    pub fn color(&self, ray: &Ray, textures: &dyn TextureProvider) -> Result<Color> {
        let Some(distance) = self.bounds.hit_distance(ray) else {
            return Ok(self.fallback);
        };
        let point = ray.at(distance);
        let Some(face) = self.bounds.face_at(point) else {
            return Ok(self.fallback);
        };
        let (u, v) = self.bounds.local_coords(point, face);
        let (width, height) = self.bounds.face_extent(face);
        sample_normalized(textures, self.key_for(face), u, v, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture, TextureStore};

    fn store() -> TextureStore {
        let mut store = TextureStore::new();
        store.insert("sideSky", Texture::checker(2, 1, 1, [0, 0, 255], [0, 255, 255]));
        store.insert("floor", Texture::solid([90, 60, 30]));
        store.insert("upSky", Texture::solid([250, 250, 250]));
        store
    }

    #[test]
    fn test_upward_ray_sees_ceiling() {
        let sky = Skybox::default();
        let c = sky.color(&Ray::new(Vec3A::ZERO, Vec3A::Y), &store()).unwrap();
        assert_eq!(c, rgb8(250, 250, 250));
    }

    #[test]
    fn test_downward_ray_sees_floor() {
        let sky = Skybox::default();
        let c = sky.color(&Ray::new(Vec3A::ZERO, -Vec3A::Y), &store()).unwrap();
        assert_eq!(c, rgb8(90, 60, 30));
    }

    #[test]
    fn test_wall_uses_normalized_coordinates() {
        let sky = Skybox::default();
        // Hits the x = -100 wall at z = -50: |z - 100| / 200 = 0.75 -> column 1 of 2.
        let dir = Vec3A::new(-100.0, 0.0, -50.0).normalize();
        let c = sky.color(&Ray::new(Vec3A::ZERO, dir), &store()).unwrap();
        assert_eq!(c, rgb8(0, 255, 255));

        // z = 50: 0.25 -> column 0.
        let dir = Vec3A::new(-100.0, 0.0, 50.0).normalize();
        let c = sky.color(&Ray::new(Vec3A::ZERO, dir), &store()).unwrap();
        assert_eq!(c, rgb8(0, 0, 255));
    }

    #[test]
    fn test_ray_from_outside_pointing_away_is_fallback() {
        let sky = Skybox::default();
        let ray = Ray::new(Vec3A::new(0.0, 500.0, 0.0), Vec3A::Y);
        assert_eq!(sky.color(&ray, &store()).unwrap(), sky.fallback);
    }

    #[test]
    fn test_degenerate_ray_is_fallback() {
        let sky = Skybox::default();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert_eq!(sky.color(&ray, &TextureStore::new()).unwrap(), sky.fallback);
    }

    #[test]
    fn test_missing_sky_texture_errors() {
        let sky = Skybox::default();
        assert!(sky.color(&Ray::new(Vec3A::ZERO, Vec3A::Y), &TextureStore::new()).is_err());
    }
}
