//! Shadow rays toward the scene light.

use glam::Vec3A;

use crate::ray::Ray;
use crate::scene::{Light, SceneObject};

/// Fraction of the light reaching `point`, in [0, 1].
///
/// Walks `objects` in scene order, skipping the one at `exclude`, and stops
/// at the first object hit at a positive distance along `light_dir`. That
/// blocker need not be the nearest one. With `d` its distance and `L` the
/// distance to the light, the result is `1 - min(1, d / L)`; with no blocker
/// the point is fully lit.
pub fn cast_shadow(
    objects: &[SceneObject],
    light: &Light,
    point: Vec3A,
    light_dir: Vec3A,
    exclude: usize,
) -> f32 {
    let ray = Ray::new(point, light_dir);
    let light_distance = (light.position - point).length();

    let blocker = objects
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .find_map(|(_, object)| object.intersect(&ray).filter(|hit| hit.distance > 0.0));

    match blocker {
        Some(hit) => 1.0 - (hit.distance / light_distance).min(1.0),
        None => 1.0,
    }
}
