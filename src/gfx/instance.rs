//! GPU-ready per-item instance data.
//!
//! The gallery core does not render, but hosts that draw items as one
//! instanced quad batch can upload [`ItemInstance`] slices straight into a
//! vertex buffer with `bytemuck::cast_slice`.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, Rad};

use crate::gallery::ItemRenderParams;

/// Instance data for a single rendered card
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ItemInstance {
    /// Model matrix for a unit quad centred on the origin in the XY plane
    pub transform: [[f32; 4]; 4],
    /// Glow colour in `rgb`, glow intensity in `a`
    pub glow: [f32; 4],
}

impl ItemInstance {
    /// Builds the instance for a camera-facing card.
    ///
    /// The viewer camera never rotates, so facing the camera means keeping
    /// the quad in the XY plane; only the idle tilt turns it about Z.
    pub fn from_params(params: &ItemRenderParams) -> Self {
        let size = params.size * params.scale;
        let transform = Matrix4::from_translation(params.world_position)
            * Matrix4::from_angle_z(Rad(params.tilt_z))
            * Matrix4::from_nonuniform_scale(size.x, size.y, 1.0);
        Self {
            transform: transform.into(),
            glow: [
                params.glow_color.x,
                params.glow_color.y,
                params.glow_color.z,
                params.glow_intensity,
            ],
        }
    }
}
