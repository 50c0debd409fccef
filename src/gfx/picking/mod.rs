//! # Item Picking
//!
//! Attributes pointer positions to gallery items by ray casting.
//!
//! ## How it works
//!
//! 1. **Pointer to Ray**: Unproject the pointer through the viewer camera into a world-space ray
//! 2. **Ray-Billboard Intersection**: Every item is a flat card facing the camera; intersect the
//!    ray with the card's plane and test the hit against the card's scaled half extents
//! 3. **Selection**: Return the closest card that was hit
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::{Vector2, Vector3};
//! use spherefolio::config::CameraConfig;
//! use spherefolio::gfx::camera::ViewerCamera;
//! use spherefolio::gfx::picking::{BillboardTarget, ItemPicker};
//!
//! let camera = ViewerCamera::new(&CameraConfig::default(), 1.0);
//! let picker = ItemPicker::new();
//! let cards = [BillboardTarget {
//!     id: 1,
//!     center: Vector3::new(0.0, 0.0, 6.0),
//!     half_extents: Vector2::new(1.25, 1.65),
//! }];
//! let hit = picker.pick((400.0, 400.0), (800.0, 800.0), &camera, cards.iter().copied());
//! assert_eq!(hit.map(|h| h.item_id), Some(1));
//! ```

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::gallery::item::ItemId;
use crate::gfx::camera::ViewerCamera;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// A camera-facing card to test against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardTarget {
    pub id: ItemId,
    /// World-space centre of the card.
    pub center: Vector3<f32>,
    /// Half width and half height in world units, already scaled.
    pub half_extents: Vector2<f32>,
}

/// Result of an item picking operation
#[derive(Debug, Clone, PartialEq)]
pub struct PickResult {
    pub item_id: ItemId,
    /// Distance from the ray origin to the intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Ray-casting picker for camera-facing cards.
#[derive(Debug, Default)]
pub struct ItemPicker;

impl ItemPicker {
    pub fn new() -> Self {
        Self
    }

    /// Convert screen coordinates to a world-space ray.
    ///
    /// Returns `None` for an empty viewport or a degenerate projection.
    pub fn screen_to_ray(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &ViewerCamera,
    ) -> Option<Ray> {
        let (mouse_x, mouse_y) = screen_pos;
        let (screen_width, screen_height) = screen_size;
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }

        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis

        let view_proj: Matrix4<f32> = camera.projection_matrix() * camera.view_matrix();
        let inv_view_proj = view_proj.invert()?;

        // Transform near and far points from NDC to world space
        let near_3d = unproject(inv_view_proj, Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
        let far_3d = unproject(inv_view_proj, Vector4::new(ndc_x, ndc_y, 1.0, 1.0));

        let direction = far_3d - near_3d;
        if direction.magnitude2() <= f32::EPSILON {
            return None;
        }
        Some(Ray::new(near_3d, direction))
    }

    /// Intersects `ray` with one card whose plane faces `toward_viewer`.
    pub fn intersect_billboard(
        ray: &Ray,
        target: &BillboardTarget,
        toward_viewer: Vector3<f32>,
        right: Vector3<f32>,
        up: Vector3<f32>,
    ) -> Option<f32> {
        let denom = ray.direction.dot(toward_viewer);
        if denom.abs() < 1.0e-6 {
            return None;
        }

        let t = (target.center - ray.origin).dot(toward_viewer) / denom;
        if t < 0.0 {
            return None;
        }

        let local = ray.point_at(t) - target.center;
        let inside = local.dot(right).abs() <= target.half_extents.x
            && local.dot(up).abs() <= target.half_extents.y;
        inside.then_some(t)
    }

    /// Pick the closest card under the pointer.
    pub fn pick(
        &self,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
        camera: &ViewerCamera,
        targets: impl IntoIterator<Item = BillboardTarget>,
    ) -> Option<PickResult> {
        let ray = self.screen_to_ray(screen_pos, screen_size, camera)?;
        let toward_viewer = camera.backward();
        let right = camera.right();
        let up = camera.true_up();

        let mut closest_result: Option<PickResult> = None;

        for target in targets {
            if let Some(distance) =
                Self::intersect_billboard(&ray, &target, toward_viewer, right, up)
            {
                // Keep the closest intersection
                if closest_result
                    .as_ref()
                    .map_or(true, |result| distance < result.distance)
                {
                    closest_result = Some(PickResult {
                        item_id: target.id,
                        distance,
                        intersection_point: ray.point_at(distance),
                    });
                }
            }
        }

        closest_result
    }
}

fn unproject(inv_view_proj: Matrix4<f32>, ndc: Vector4<f32>) -> Vector3<f32> {
    let world = inv_view_proj * ndc;
    Vector3::new(world.x / world.w, world.y / world.w, world.z / world.w)
}
