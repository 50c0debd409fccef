use super::camera_utils::{Camera, CameraUniform, OPENGL_TO_CLIP_MATRIX};
use cgmath::*;

use crate::config::CameraConfig;

/// Fixed camera looking at the gallery centre from `+Z`.
///
/// The gallery rotates, the viewer does not. Only the aspect ratio changes,
/// when the host window is resized.
#[derive(Debug, Clone, Copy)]
pub struct ViewerCamera {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for ViewerCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_CLIP_MATRIX * self.projection_matrix() * self.view_matrix()
    }
}

impl ViewerCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vector3::new(0.0, 0.0, config.distance),
            target: Vector3::zero(),
            up: Vector3::unit_y(),
            aspect,
            fovy: config.fovy.into(),
            znear: config.znear,
            zfar: config.zfar,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            self.up,
        )
    }

    /// OpenGL-convention projection (NDC depth in `-1..1`), used for picking.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Unit vector from the target back toward the eye.
    pub fn backward(&self) -> Vector3<f32> {
        (self.eye - self.target).normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.up.cross(self.backward()).normalize()
    }

    /// The up vector re-orthogonalised against the view direction.
    pub fn true_up(&self) -> Vector3<f32> {
        self.backward().cross(self.right()).normalize()
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_view_proj();
    }

    pub fn update_view_proj(&mut self) {
        self.uniform = CameraUniform::new(self.eye, self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_placement() {
        let camera = ViewerCamera::new(&CameraConfig::default(), 1.5);
        assert_eq!(camera.eye, Vector3::new(0.0, 0.0, 18.0));
        assert!((camera.backward() - Vector3::unit_z()).magnitude() < 1e-6);
        assert!((camera.right() - Vector3::unit_x()).magnitude() < 1e-6);
        assert!((camera.true_up() - Vector3::unit_y()).magnitude() < 1e-6);
        assert_eq!(camera.uniform.view_position, [0.0, 0.0, 18.0, 1.0]);
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = ViewerCamera::new(&CameraConfig::default(), 1.0);
        camera.resize_projection(800, 0);
        assert_eq!(camera.aspect, 1.0);
        camera.resize_projection(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }
}
