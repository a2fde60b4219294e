//! Camera for primary ray generation and frame rendering

use std::f32::consts::FRAC_PI_3;

use glam::{Quat, Vec3, Vec3A};
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::error::Result;
use crate::tracer::Tracer;

/// Size of the rendered frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Pinhole camera looking from `position` toward `target`.
///
/// Every primary ray starts at `position`; the kernel also uses that point
/// as the reference for its specular and reflection vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Point camera is looking from
    pub position: Vec3A,
    /// Point camera is looking at
    pub target: Vec3A,
    /// Camera-relative "up" direction vector
    pub up: Vec3A,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3A::new(0.0, 0.0, 5.0),
            target: Vec3A::ZERO,
            up: Vec3A::Y,
            fov: FRAC_PI_3,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3A, target: Vec3A, up: Vec3A, fov: f32) -> Self {
        Self {
            position,
            target,
            up,
            fov,
        }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3A {
        (self.target - self.position).normalize_or_zero()
    }

    /// Rotate the camera position about the target around world Y.
    pub fn orbit(&mut self, degrees: f32) {
        let rotation = Quat::from_axis_angle(Vec3::Y, degrees.to_radians());
        self.position = self.target + rotation * (self.position - self.target);
    }

    /// Move the camera along its view direction; negative values back away.
    pub fn dolly(&mut self, delta: f32) {
        self.position += self.forward() * delta;
    }

    /// World-space direction of the primary ray through the center of pixel
    /// `(x, y)`, counted from the top-left corner.
    pub fn ray_direction(&self, x: u32, y: u32, viewport: Viewport) -> Vec3A {
        let half_height = (self.fov / 2.0).tan();
        let screen_x =
            ((2.0 * (x as f32 + 0.5)) / viewport.width as f32 - 1.0) * viewport.aspect() * half_height;
        let screen_y = (1.0 - (2.0 * (y as f32 + 0.5)) / viewport.height as f32) * half_height;

        let forward = self.forward();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        (forward + right * screen_x + up * screen_y).normalize_or_zero()
    }

    /// Render one frame, one primary ray per pixel, row by row.
    ///
    /// Returns an image buffer holding the unclamped f32 RGB colors.
    pub fn render(&self, tracer: &Tracer, viewport: Viewport) -> Result<ImageBuffer<Rgb<f32>, Vec<f32>>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(viewport.width, viewport.height);

        info!(
            "Rendering {}x{} (max depth {})...",
            viewport.width,
            viewport.height,
            tracer.settings().max_depth
        );
        let generation_start = std::time::Instant::now();

        let pb = ProgressBar::new(viewport.pixel_count());
        if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}") {
            pb.set_style(style);
        }

        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let color = tracer.trace(self.position, self.ray_direction(x, y, viewport))?;
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        }

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Light, Scene};
    use crate::skybox::Skybox;
    use crate::texture::{Texture, TextureStore};
    use crate::tracer::TraceSettings;

    #[test]
    fn test_center_pixel_looks_at_target() {
        let camera = Camera::default();
        let viewport = Viewport::new(101, 101);
        let dir = camera.ray_direction(50, 50, viewport);
        assert!((dir - Vec3A::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_top_left_pixel_points_up_left() {
        let camera = Camera::default();
        let dir = camera.ray_direction(0, 0, Viewport::new(800, 600));
        assert!(dir.x < 0.0);
        assert!(dir.y > 0.0);
        assert!(dir.z < 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_edge_pixel_matches_field_of_view() {
        let camera = Camera::default();
        // One-pixel-high frame: the row center sits on the horizon.
        let viewport = Viewport::new(2, 1);
        let dir = camera.ray_direction(1, 0, viewport);
        // screen_x = (2 * 1.5 / 2 - 1) * aspect * tan(fov / 2) = 0.5 * 2 * tan(pi / 6)
        let expected = Vec3A::new((FRAC_PI_3 / 2.0).tan(), 0.0, -1.0).normalize();
        assert!((dir - expected).length() < 1e-5);
    }

    #[test]
    fn test_orbit_quarter_turn() {
        let mut camera = Camera::default();
        camera.orbit(90.0);
        assert!((camera.position - Vec3A::new(5.0, 0.0, 0.0)).length() < 1e-4);
        assert_eq!(camera.target, Vec3A::ZERO);
    }

    #[test]
    fn test_dolly_moves_toward_target() {
        let mut camera = Camera::default();
        camera.dolly(2.0);
        assert!((camera.position - Vec3A::new(0.0, 0.0, 3.0)).length() < 1e-6);
        camera.dolly(-1.0);
        assert!((camera.position - Vec3A::new(0.0, 0.0, 4.0)).length() < 1e-6);
    }

    #[test]
    fn test_render_empty_scene_shows_sky() {
        let mut store = TextureStore::new();
        store.insert("sideSky", Texture::solid([0, 0, 255]));
        store.insert("floor", Texture::solid([0, 255, 0]));
        store.insert("upSky", Texture::solid([255, 0, 0]));
        let scene = Scene::new(Light::default());
        let skybox = Skybox::default();
        let tracer = Tracer::new(&scene, &skybox, &store, TraceSettings::default()).unwrap();

        let image = Camera::default().render(&tracer, Viewport::new(4, 3)).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        // The camera looks down -z at the side wall.
        let center = image.get_pixel(1, 1);
        assert_eq!(center.0, [0.0, 0.0, 1.0]);
    }
}
