//! Gallery item model.
//!
//! Items are owned by the host and handed to the gallery as an ordered list.
//! The gallery treats `content_ref` and [`DisplayMeta`] as opaque: they are
//! carried through to `on_select` callbacks so the host can show a detail
//! panel, but nothing in the interaction core reads them.

/// Unique identifier of a gallery item.
pub type ItemId = u32;

/// Aspect ratio (width / height) of the reference 2.5 x 3.3 card.
pub const DEFAULT_ASPECT: f32 = 2.5 / 3.3;

/// Text shown by the host for a focused item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayMeta {
    pub title: String,
    pub description: String,
    pub links: Vec<String>,
    pub tags: Vec<String>,
}

impl DisplayMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub id: ItemId,
    /// Opaque handle to the item's visual content (texture path, URL, asset key).
    pub content_ref: String,
    pub meta: DisplayMeta,
    /// Width over height of the item's content, used by fit-to-frame.
    pub aspect: f32,
}

impl GalleryItem {
    pub fn new(id: ItemId, content_ref: impl Into<String>) -> Self {
        Self {
            id,
            content_ref: content_ref.into(),
            meta: DisplayMeta::default(),
            aspect: DEFAULT_ASPECT,
        }
    }

    pub fn with_meta(mut self, meta: DisplayMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}
