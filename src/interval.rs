//! Interval arithmetic for ray parameter ranges.
//!
//! Closed intervals [min, max] of the ray parameter t, used to run the slab
//! test against axis-aligned boxes one axis at a time.

use glam::Vec3A;

use crate::ray::Ray;

/// Closed interval [min, max] of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Entry parameter (near)
    pub min: f32,
    /// Exit parameter (far)
    pub max: f32,
}

impl Interval {
    /// Create a new interval with given min and max values
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Parameter range in which a ray lies between two parallel planes.
    ///
    /// `lo` and `hi` may come in either order. A zero direction component
    /// arrives here as an infinite `inv_dir`; a `0 * inf` NaN is discarded by
    /// `f32::min`/`f32::max`, which return the non-NaN operand.
    pub fn slab(origin: f32, inv_dir: f32, lo: f32, hi: f32) -> Self {
        let t1 = (lo - origin) * inv_dir;
        let t2 = (hi - origin) * inv_dir;
        Self {
            min: t1.min(t2),
            max: t1.max(t2),
        }
    }

    /// Running near/far interval of a ray against the box spanned by two
    /// corners, accumulated over the x, y and z slabs.
    pub fn through_box(ray: &Ray, a: Vec3A, b: Vec3A) -> Self {
        let inv = ray.inv_direction();
        Self::slab(ray.origin.x, inv.x, a.x, b.x)
            .intersect(Self::slab(ray.origin.y, inv.y, a.y, b.y))
            .intersect(Self::slab(ray.origin.z, inv.z, a.z, b.z))
    }

    /// Narrow this interval to the overlap with `other`.
    pub fn intersect(self, other: Interval) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    /// True when the interval holds no parameter (min > max)
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Distance at which the ray meets the box surface, if it does.
    ///
    /// None when the interval is empty or lies entirely behind the origin.
    /// Otherwise the entry parameter, or the exit parameter when the origin
    /// is already inside.
    pub fn entry(&self) -> Option<f32> {
        if self.is_empty() || self.max < 0.0 {
            return None;
        }
        Some(if self.min >= 0.0 { self.min } else { self.max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_unordered_planes() {
        let a = Interval::slab(0.0, 1.0, 5.0, -5.0);
        assert_eq!(a, Interval::new(-5.0, 5.0));
    }

    #[test]
    fn test_slab_parallel_inside() {
        // Direction component zero, origin between the planes: unbounded.
        let s = Interval::slab(0.5, f32::INFINITY, 0.0, 1.0);
        assert_eq!(s.min, f32::NEG_INFINITY);
        assert_eq!(s.max, f32::INFINITY);
    }

    #[test]
    fn test_slab_parallel_outside_is_empty_after_intersect() {
        let s = Interval::slab(2.0, f32::INFINITY, 0.0, 1.0);
        // Both planes behind: [-inf, -inf]
        let merged = Interval::new(0.0, 10.0).intersect(s);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_entry_selection() {
        assert_eq!(Interval::new(2.0, 4.0).entry(), Some(2.0));
        assert_eq!(Interval::new(-1.0, 4.0).entry(), Some(4.0));
        assert_eq!(Interval::new(-4.0, -1.0).entry(), None);
        assert_eq!(Interval::new(3.0, 1.0).entry(), None);
    }

    #[test]
    fn test_through_box_hits() {
        let ray = Ray::new(Vec3A::new(-5.0, 0.0, 0.0), Vec3A::X);
        let span = Interval::through_box(&ray, Vec3A::splat(-1.0), Vec3A::splat(1.0));
        assert!((span.min - 4.0).abs() < 1e-6);
        assert!((span.max - 6.0).abs() < 1e-6);
    }
}
