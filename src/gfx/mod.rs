//! # Graphics Module
//!
//! Renderer-agnostic graphics helpers for the gallery:
//!
//! - **Camera** ([`camera`]) - Fixed viewer camera looking at the sphere centre
//! - **Picking** ([`picking`]) - Ray casting from pointer positions to item cards
//! - **Instances** ([`instance`]) - Per-item data laid out for GPU upload
//!
//! The gallery core does not own a GPU device. Hosts that draw with a GPU
//! API upload [`CameraUniform`] and [`ItemInstance`] data directly.

pub mod camera;
pub mod instance;
pub mod picking;

// Re-export commonly used types
pub use camera::{CameraUniform, ViewerCamera};
pub use instance::ItemInstance;
pub use picking::{ItemPicker, PickResult};
