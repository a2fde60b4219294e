//! Sphere primitive for ray tracing.

use glam::Vec3A;

use crate::hittable::{Hittable, Intersect};
use crate::ray::Ray;

/// Sphere primitive defined by center and radius.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3A, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersect> {
        // |O + tD - C|^2 = r^2
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Only the near root counts: an origin inside the sphere sees no hit.
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if !t.is_finite() || t < 0.0 {
            return None;
        }

        let point = ray.at(t);
        let normal = (point - self.center).normalize();
        Some(Intersect::new(t, point, normal))
    }
}
