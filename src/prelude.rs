//! # Spherefolio Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use spherefolio::prelude::*;
//!
//! let mut gallery = SphereGallery::new(GalleryConfig::default()).unwrap();
//! gallery.set_items(vec![GalleryItem::new(1, "cover.jpg")]).unwrap();
//! gallery.push_event(InputEvent::Escape);
//! gallery.tick(1.0 / 60.0);
//! ```

// Re-export core application types
pub use crate::app::GalleryApp;
pub use crate::config::{GalleryConfig, GlowPreset, Rgb};
pub use crate::error::GalleryError;

// Re-export gallery types
pub use crate::gallery::{
    DisplayMeta, GalleryItem, ItemId, ItemRenderParams, ItemVisualState, PlacedItem,
    SelectionState, SphereGallery,
};

// Re-export interaction types
pub use crate::controls::{InputEvent, RotationController};

// Re-export rendering helpers
pub use crate::gfx::camera::CameraUniform;
pub use crate::gfx::instance::ItemInstance;

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Quaternion, Vector2, Vector3};
