//! Error types for gallery construction and configuration.
//!
//! Interaction paths (pointer input, selection, ticking) never fail: invalid
//! input there is ignored and logged. Errors only surface when a host hands
//! the gallery a bad configuration or an inconsistent item list.

use thiserror::Error;

use crate::gallery::item::ItemId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GalleryError {
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("item id {0} appears more than once in the item list")]
    DuplicateItemId(ItemId),

    #[error("item {id} has an unusable aspect ratio {aspect}")]
    InvalidAspectRatio { id: ItemId, aspect: f32 },
}

pub type Result<T> = std::result::Result<T, GalleryError>;
