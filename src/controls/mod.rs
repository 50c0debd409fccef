//! # Interaction Controls
//!
//! Pointer handling and orientation control for the gallery:
//!
//! - [`InputRouter`] - Classifies pointer cycles into clicks and drags
//! - [`RotationController`] - Owns the orientation, inertia, auto-spin and focus lock
//! - [`focus`] - Computes the orientation that turns an item toward the viewer

pub mod focus;
pub mod input_router;
pub mod rotation_controller;

// Re-export main types
pub use focus::compute_focus_target;
pub use input_router::{Gesture, InputEvent, InputRouter};
pub use rotation_controller::{OrientationState, RotationController};
