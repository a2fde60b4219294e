//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives and the Intersect hit
//! record handed from geometry to the shading kernel.

use glam::Vec3A;

use crate::cuboid::BoxFace;
use crate::material::Color;
use crate::ray::Ray;

/// Result of a successful ray-primitive test.
///
/// Created fresh per test and never mutated once the primitive returns it,
/// apart from the texture color attached by the owning scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersect {
    /// Distance along the ray to the hit point, never negative
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3A,
    /// Unit outward surface normal at the hit point
    pub normal: Vec3A,
    /// Box face the point lies on, for box primitives
    pub face: Option<BoxFace>,
    /// Texture color overriding the material's diffuse color
    pub color: Option<Color>,
}

impl Intersect {
    /// Hit record without face information or texture color.
    pub fn new(distance: f32, point: Vec3A, normal: Vec3A) -> Self {
        Self {
            distance,
            point,
            normal,
            face: None,
            color: None,
        }
    }

    /// Whether a procedural texture supplied the surface color.
    pub fn has_color(&self) -> bool {
        self.color.is_some()
    }
}

/// Trait for geometry that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send): scenes are shared read-only by every
/// ray of a frame.
pub trait Hittable: Sync + Send {
    /// Nearest surface point along the ray at a non-negative distance, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersect>;
}
