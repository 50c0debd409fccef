//! # Basic Gallery Example
//!
//! Opens a window with a sphere of placeholder items.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=info cargo run --example basic -- 40
//! ```
//!
//! ## What you'll see:
//! - The sphere spinning slowly until the first item is clicked
//! - Dragging rotates the sphere with inertia
//! - Clicking an item turns it to face you; Escape or an empty click releases it
//!
//! The window title shows the focused item's title.

use anyhow::Context;
use spherefolio::prelude::*;

const DEFAULT_ITEM_COUNT: u32 = 24;

const TAGS: [&str; 4] = ["design", "photo", "motion", "print"];

fn demo_items(count: u32) -> Vec<GalleryItem> {
    (1..=count)
        .map(|id| {
            let meta = DisplayMeta {
                title: format!("Project {id:02}"),
                description: format!("Placeholder entry number {id}"),
                links: vec![format!("https://example.com/projects/{id}")],
                tags: vec![TAGS[id as usize % TAGS.len()].to_string()],
            };
            // Every third item is landscape.
            let aspect = if id % 3 == 0 { 1.5 } else { 2.5 / 3.3 };
            GalleryItem::new(id, format!("images/project-{id:02}.jpg"))
                .with_meta(meta)
                .with_aspect(aspect)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let count = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u32>()
            .with_context(|| format!("item count must be a positive integer, got {arg:?}"))?,
        None => DEFAULT_ITEM_COUNT,
    };

    let mut app = GalleryApp::new(GalleryConfig::default(), demo_items(count))?;
    app.on_select(|item| match item {
        Some(item) => log::info!(
            "selected {} [{}] -> {}",
            item.meta.title,
            item.meta.tags.join(", "),
            item.content_ref
        ),
        None => log::info!("selection cleared"),
    });

    app.run()
}
