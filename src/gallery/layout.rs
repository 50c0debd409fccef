//! # Sphere Layout
//!
//! Places items on a sphere with the Fibonacci (golden angle) distribution.
//! Index `i` of `n` gets height `y = 1 - 2i/(n-1)`, a ring of radius
//! `sqrt(1 - y^2)` at that height, and an azimuth of `i` golden angles, so
//! consecutive items land far apart and neither pole clusters.
//!
//! The function is pure: the same `(items, radius)` always produces the same
//! positions, which makes layouts safe to snapshot.

use cgmath::{InnerSpace, Vector3};

use super::item::GalleryItem;

/// The golden angle `π(3 − √5)` in radians (~2.39996).
pub fn golden_angle() -> f32 {
    std::f32::consts::PI * (3.0 - 5.0_f32.sqrt())
}

/// An item together with its resting place on the sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub item: GalleryItem,
    /// Position on the sphere surface, `|base_position| == radius`.
    pub base_position: Vector3<f32>,
    /// Unit vector from the centre towards `base_position`.
    pub base_direction: Vector3<f32>,
}

/// Unit direction for index `index` out of `count` points.
///
/// A single point sits on the north pole instead of dividing by `count - 1`.
pub fn fibonacci_direction(index: usize, count: usize) -> Vector3<f32> {
    let y = if count <= 1 {
        1.0
    } else {
        1.0 - (index as f32 / (count - 1) as f32) * 2.0
    };
    let ring_radius = (1.0 - y * y).max(0.0).sqrt();
    let theta = index as f32 * golden_angle();

    // Renormalise to absorb rounding from sqrt/cos/sin.
    Vector3::new(theta.cos() * ring_radius, y, theta.sin() * ring_radius).normalize()
}

/// Lays `items` out on a sphere of `radius`, preserving list order.
pub fn layout(items: &[GalleryItem], radius: f32) -> Vec<PlacedItem> {
    let count = items.len();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let base_direction = fibonacci_direction(index, count);
            PlacedItem {
                item: item.clone(),
                base_position: base_direction * radius,
                base_direction,
            }
        })
        .collect()
}
