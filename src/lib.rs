// src/lib.rs
//! Spherefolio
//!
//! Interactive spherical gallery core: items laid out on a sphere, rotated by
//! dragging with inertia, and focused by turning the whole sphere until the
//! chosen item faces the viewer.

pub mod app;
pub mod config;
pub mod controls;
pub mod error;
pub mod gallery;
pub mod gfx;
pub mod prelude;

// Re-export main types for convenience
pub use app::GalleryApp;
pub use config::GalleryConfig;
pub use error::GalleryError;
pub use gallery::SphereGallery;
