//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, a half-line used for
//! primary camera rays, shadow rays and the recursive reflection/refraction
//! bounces of the tracer.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera position for primary rays, a biased surface point for
    /// secondary rays.
    pub origin: Vec3A,

    /// Direction of the ray, unit length for every ray the tracer creates.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// Component-wise reciprocal of the direction.
    ///
    /// Zero components become ±infinity (IEEE division), which the slab test
    /// relies on for axis-parallel rays.
    pub fn inv_direction(&self) -> Vec3A {
        Vec3A::ONE / self.direction
    }

    /// True when the direction cannot describe a half-line: zero length or
    /// a non-finite component. Such rays never hit anything.
    pub fn is_degenerate(&self) -> bool {
        !self.direction.is_finite() || self.direction.length_squared() == 0.0
    }
}
