//! Axis-aligned box primitive.
//!
//! Intersection uses the slab method; the hit face is recovered afterwards
//! by testing the hit point against each bounding plane within
//! [`FACE_EPSILON`].

use glam::Vec3A;

use crate::hittable::{Hittable, Intersect};
use crate::interval::Interval;
use crate::ray::Ray;

/// Tolerance, in world units, for deciding that a point lies on a face.
pub const FACE_EPSILON: f32 = 1e-4;

/// One of the six bounding planes of a box, named by the corner it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxFace {
    /// x = min.x
    MinX,
    /// x = max.x
    MaxX,
    /// y = min.y
    MinY,
    /// y = max.y
    MaxY,
    /// z = min.z
    MinZ,
    /// z = max.z
    MaxZ,
}

impl BoxFace {
    /// Face test order for normals and the skybox; at edges and corners the
    /// first matching face wins.
    pub const AXIS_ORDER: [BoxFace; 6] = [
        BoxFace::MinX,
        BoxFace::MaxX,
        BoxFace::MinY,
        BoxFace::MaxY,
        BoxFace::MinZ,
        BoxFace::MaxZ,
    ];

    /// Axis index (0 = x, 1 = y, 2 = z) the face is perpendicular to.
    pub fn axis(self) -> usize {
        match self {
            BoxFace::MinX | BoxFace::MaxX => 0,
            BoxFace::MinY | BoxFace::MaxY => 1,
            BoxFace::MinZ | BoxFace::MaxZ => 2,
        }
    }

    fn is_min(self) -> bool {
        matches!(self, BoxFace::MinX | BoxFace::MinY | BoxFace::MinZ)
    }
}

/// Axis-aligned box spanned by two corners.
///
/// The corners are kept exactly as given: `min` need not be component-wise
/// smaller than `max`, and face names refer to the corner a plane came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    /// First corner; local texture coordinates are measured from it.
    pub min: Vec3A,
    /// Opposite corner.
    pub max: Vec3A,
}

impl Cuboid {
    pub fn new(min: Vec3A, max: Vec3A) -> Self {
        Self { min, max }
    }

    /// Slab-method hit distance, ignoring faces.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f32> {
        if ray.is_degenerate() {
            return None;
        }
        Interval::through_box(ray, self.min, self.max)
            .entry()
            .filter(|t| t.is_finite())
    }

    /// Coordinate of a face's plane along its axis.
    pub fn plane(&self, face: BoxFace) -> f32 {
        let corner = if face.is_min() { self.min } else { self.max };
        corner[face.axis()]
    }

    /// Whether `point` lies on `face` within [`FACE_EPSILON`].
    pub fn on_face(&self, point: Vec3A, face: BoxFace) -> bool {
        (point[face.axis()] - self.plane(face)).abs() < FACE_EPSILON
    }

    /// First face of `order` that `point` lies on.
    pub fn face_in_order(&self, point: Vec3A, order: &[BoxFace]) -> Option<BoxFace> {
        order.iter().copied().find(|&face| self.on_face(point, face))
    }

    /// Face `point` lies on, tested in [`BoxFace::AXIS_ORDER`].
    pub fn face_at(&self, point: Vec3A) -> Option<BoxFace> {
        self.face_in_order(point, &BoxFace::AXIS_ORDER)
    }

    /// Unit normal of a face pointing away from the opposite face.
    pub fn outward_normal(&self, face: BoxFace) -> Vec3A {
        let axis = face.axis();
        let (this, other) = if face.is_min() {
            (self.min[axis], self.max[axis])
        } else {
            (self.max[axis], self.min[axis])
        };
        let mut normal = Vec3A::ZERO;
        normal[axis] = if this < other { -1.0 } else { 1.0 };
        normal
    }

    /// Width and height of a face in the same axis order as
    /// [`Cuboid::local_coords`].
    pub fn face_extent(&self, face: BoxFace) -> (f32, f32) {
        let span = (self.max - self.min).abs();
        match face.axis() {
            0 => (span.z, span.y),
            1 => (span.x, span.z),
            _ => (span.x, span.y),
        }
    }

    /// Surface-local coordinates of `point` on `face`: absolute offsets from
    /// the `min` corner along the two in-plane axes.
    pub fn local_coords(&self, point: Vec3A, face: BoxFace) -> (f32, f32) {
        let d = (point - self.min).abs();
        match face.axis() {
            0 => (d.z, d.y),
            1 => (d.x, d.z),
            _ => (d.x, d.y),
        }
    }

    /// Face whose plane is nearest to `point`, used when rounding leaves a
    /// hit point outside every epsilon band.
    fn nearest_face(&self, point: Vec3A) -> BoxFace {
        BoxFace::AXIS_ORDER
            .iter()
            .copied()
            .min_by(|&a, &b| {
                let da = (point[a.axis()] - self.plane(a)).abs();
                let db = (point[b.axis()] - self.plane(b)).abs();
                da.total_cmp(&db)
            })
            .unwrap_or(BoxFace::MinX)
    }
}

impl Hittable for Cuboid {
    fn intersect(&self, ray: &Ray) -> Option<Intersect> {
        let distance = self.hit_distance(ray)?;
        let point = ray.at(distance);
        let face = self
            .face_at(point)
            .unwrap_or_else(|| self.nearest_face(point));

        Some(Intersect {
            face: Some(face),
            ..Intersect::new(distance, point, self.outward_normal(face))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Cuboid {
        Cuboid::new(Vec3A::splat(-1.0), Vec3A::splat(1.0))
    }

    #[test]
    fn test_ray_box_along_x() {
        let ray = Ray::new(Vec3A::new(-5.0, 0.0, 0.0), Vec3A::X);
        let hit = unit_box().intersect(&ray).expect("hit");
        assert!((hit.distance - 4.0).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3A::new(-1.0, 0.0, 0.0));
        assert_eq!(hit.face, Some(BoxFace::MinX));
    }

    #[test]
    fn test_ray_box_every_face_normal() {
        let cases = [
            (Vec3A::new(5.0, 0.2, 0.1), -Vec3A::X, Vec3A::X),
            (Vec3A::new(0.2, -5.0, 0.1), Vec3A::Y, -Vec3A::Y),
            (Vec3A::new(0.2, 5.0, 0.1), -Vec3A::Y, Vec3A::Y),
            (Vec3A::new(0.2, 0.1, -5.0), Vec3A::Z, -Vec3A::Z),
            (Vec3A::new(0.2, 0.1, 5.0), -Vec3A::Z, Vec3A::Z),
        ];
        for (origin, dir, normal) in cases {
            let hit = unit_box().intersect(&Ray::new(origin, dir)).expect("hit");
            assert!((hit.distance - 4.0).abs() < 1e-6);
            assert_eq!(hit.normal, normal, "origin {origin:?}");
        }
    }

    #[test]
    fn test_ray_box_from_inside_uses_exit() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::Y);
        let hit = unit_box().intersect(&ray).expect("hit");
        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert_eq!(hit.face, Some(BoxFace::MaxY));
    }

    #[test]
    fn test_ray_box_miss_and_behind() {
        let miss = Ray::new(Vec3A::new(-5.0, 3.0, 0.0), Vec3A::X);
        assert!(unit_box().intersect(&miss).is_none());

        let behind = Ray::new(Vec3A::new(-5.0, 0.0, 0.0), -Vec3A::X);
        assert!(unit_box().intersect(&behind).is_none());
    }

    #[test]
    fn test_axis_parallel_ray_on_face_plane() {
        // Origin exactly on the y = 1 plane with zero y direction: the far
        // bound is 0 * inf = NaN and is dropped, so the y slab collapses to
        // [-inf, -inf] and the grazing ray misses.
        let ray = Ray::new(Vec3A::new(-5.0, 1.0, 0.0), Vec3A::X);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn test_degenerate_ray_never_hits() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn test_edge_tie_prefers_x() {
        let b = unit_box();
        assert_eq!(b.face_at(Vec3A::new(-1.0, 1.0, 0.0)), Some(BoxFace::MinX));
        assert_eq!(b.face_at(Vec3A::new(0.5, 1.0, 1.0)), Some(BoxFace::MaxY));
        assert_eq!(b.face_at(Vec3A::new(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_unordered_corners_normal_faces_outward() {
        // min.z > max.z, as in the diorama blocks.
        let b = Cuboid::new(Vec3A::new(0.0, 0.0, -1.0), Vec3A::new(1.0, 1.0, -4.0));
        let ray = Ray::new(Vec3A::new(0.5, 0.5, 5.0), -Vec3A::Z);
        let hit = b.intersect(&ray).expect("hit");
        assert!((hit.distance - 6.0).abs() < 1e-5);
        assert_eq!(hit.face, Some(BoxFace::MinZ));
        assert_eq!(hit.normal, Vec3A::Z);
    }

    #[test]
    fn test_local_coords_per_axis() {
        let b = Cuboid::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(4.0, 6.0, -2.0));
        let p = Vec3A::new(2.0, 6.0, 0.0);
        assert_eq!(b.local_coords(p, BoxFace::MaxY), (1.0, 3.0));
        assert_eq!(b.local_coords(p, BoxFace::MinX), (3.0, 4.0));
        assert_eq!(b.local_coords(p, BoxFace::MaxZ), (1.0, 4.0));
        assert_eq!(b.face_extent(BoxFace::MaxY), (3.0, 5.0));
    }
}
