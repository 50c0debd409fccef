pub mod camera_utils;
pub mod viewer_camera;

// Re-export main types
pub use camera_utils::{Camera, CameraUniform};
pub use viewer_camera::ViewerCamera;
