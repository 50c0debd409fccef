//! # Focus Animator
//!
//! Computes the orientation that turns a chosen item to face the viewer.
//! The item's resting direction is carried into world space by the current
//! orientation, the shortest arc from there onto the forward axis `+Z` is
//! found, and that arc is composed in front of the current orientation.
//! The result is handed to the rotation controller as its focus target.
//!
//! Because the target is always built from the *current* orientation,
//! focusing a second item mid-transition simply overwrites the first target.

use cgmath::{InnerSpace, One, Quaternion, Rad, Rotation, Rotation3, Vector3};

use crate::gallery::layout::PlacedItem;

/// Direction from the sphere centre toward the viewer, `+Z`.
pub fn forward_axis() -> Vector3<f32> {
    Vector3::unit_z()
}

const PARALLEL_EPSILON: f32 = 1.0e-6;

/// Where `placed` currently points, given the gallery orientation.
pub fn world_direction(placed: &PlacedItem, orientation: Quaternion<f32>) -> Vector3<f32> {
    orientation.rotate_vector(placed.base_direction)
}

/// Shortest rotation taking unit vector `from` onto unit vector `to`.
///
/// Already-aligned vectors give the identity. Opposite vectors have no
/// unique shortest arc; they are turned half a revolution about the
/// vertical axis, or about `+X` when the vectors are themselves vertical,
/// so items stay upright.
pub fn minimal_rotation(from: Vector3<f32>, to: Vector3<f32>) -> Quaternion<f32> {
    let from = from.normalize();
    let to = to.normalize();
    let dot = from.dot(to);

    if dot >= 1.0 - PARALLEL_EPSILON {
        return Quaternion::one();
    }
    if dot <= -1.0 + PARALLEL_EPSILON {
        let axis = if from.cross(Vector3::unit_y()).magnitude2() > PARALLEL_EPSILON {
            Vector3::unit_y()
        } else {
            Vector3::unit_x()
        };
        return Quaternion::from_axis_angle(axis, Rad(std::f32::consts::PI));
    }

    Quaternion::from_arc(from, to, None).normalize()
}

/// Absolute orientation that brings `placed` to face the viewer.
pub fn compute_focus_target(placed: &PlacedItem, current: Quaternion<f32>) -> Quaternion<f32> {
    let world = world_direction(placed, current);
    (minimal_rotation(world, forward_axis()) * current).normalize()
}
