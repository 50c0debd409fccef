//! # Sphere Gallery
//!
//! [`SphereGallery`] ties the pieces together and owns the per-frame tick:
//!
//! ```text
//! items ──layout──▶ placed items ─────────────────────────────┐
//! input ──queue──▶ InputRouter ──▶ click: select / deselect   │
//!                              └─▶ drag: angular velocity     ▼
//!                    RotationController ◀── FocusAnimator ── item visuals ──▶ render params
//! ```
//!
//! Input events may arrive at any time through [`SphereGallery::push_event`];
//! they are queued and applied, in order, at the start of the next
//! [`SphereGallery::tick`]. The tick then advances the orientation and every
//! item's visual state. There is exactly one writer of the orientation.
//!
//! ## Usage
//!
//! ```rust
//! use spherefolio::prelude::*;
//!
//! let items: Vec<GalleryItem> = (1..=8)
//!     .map(|id| GalleryItem::new(id, format!("images/{id}.jpg")))
//!     .collect();
//! let mut gallery = SphereGallery::with_items(GalleryConfig::default(), items).unwrap();
//! gallery.on_select(|item| println!("focused: {:?}", item.map(|i| i.id)));
//!
//! gallery.select(3);
//! for _ in 0..240 {
//!     gallery.tick(1.0 / 60.0);
//! }
//! assert_eq!(gallery.selected_id(), Some(3));
//! ```

pub mod item;
pub mod layout;
pub mod selection;
pub mod visual;

use std::collections::{HashSet, VecDeque};

use cgmath::{Quaternion, Rotation, Vector2, Vector3};

use crate::config::{GalleryConfig, Rgb};
use crate::controls::focus::compute_focus_target;
use crate::controls::input_router::{Gesture, InputEvent, InputRouter};
use crate::controls::rotation_controller::RotationController;
use crate::error::{GalleryError, Result};
use crate::gfx::camera::ViewerCamera;
use crate::gfx::instance::ItemInstance;
use crate::gfx::picking::{BillboardTarget, ItemPicker};

pub use item::{DisplayMeta, GalleryItem, ItemId};
pub use layout::{layout, PlacedItem};
pub use selection::SelectionState;
pub use visual::ItemVisualState;

/// Callback fired whenever the focused item changes.
pub type SelectCallback = Box<dyn FnMut(Option<&GalleryItem>)>;

/// Everything a renderer needs to draw one item for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRenderParams {
    pub id: ItemId,
    /// Base position carried by the gallery orientation, plus the idle float.
    pub world_position: Vector3<f32>,
    pub scale: f32,
    /// Unscaled card size in world units.
    pub size: Vector2<f32>,
    pub glow_intensity: f32,
    pub glow_color: Rgb,
    pub tilt_z: f32,
}

pub struct SphereGallery {
    config: GalleryConfig,
    placed: Vec<PlacedItem>,
    visuals: Vec<ItemVisualState>,
    selection: SelectionState,
    rotation: RotationController,
    router: InputRouter,
    camera: ViewerCamera,
    picker: ItemPicker,
    pending: VecDeque<InputEvent>,
    hovered: Option<ItemId>,
    viewport: Vector2<f32>,
    on_select: Option<SelectCallback>,
}

impl SphereGallery {
    /// Creates an empty gallery.
    pub fn new(config: GalleryConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Vector2::new(1280.0, 800.0);
        Ok(Self {
            config,
            placed: Vec::new(),
            visuals: Vec::new(),
            selection: SelectionState::new(),
            rotation: RotationController::new(config.rotation),
            router: InputRouter::new(config.input),
            camera: ViewerCamera::new(&config.camera, viewport.x / viewport.y),
            picker: ItemPicker::new(),
            pending: VecDeque::new(),
            hovered: None,
            viewport,
            on_select: None,
        })
    }

    pub fn with_items(config: GalleryConfig, items: Vec<GalleryItem>) -> Result<Self> {
        let mut gallery = Self::new(config)?;
        gallery.set_items(items)?;
        Ok(gallery)
    }

    /// Replaces the item list and recomputes the layout.
    ///
    /// All placements and visual states are rebuilt. The selection is left
    /// alone: whether a new list should clear it is the host's call, see
    /// [`SphereGallery::deselect`]. A selected item that is still placed is
    /// re-targeted from its new position; otherwise the focus lock is released.
    pub fn set_items(&mut self, items: Vec<GalleryItem>) -> Result<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(GalleryError::DuplicateItemId(item.id));
            }
            if !(item.aspect.is_finite() && item.aspect > 0.0) {
                return Err(GalleryError::InvalidAspectRatio {
                    id: item.id,
                    aspect: item.aspect,
                });
            }
        }

        self.placed = layout(&items, self.config.radius);
        self.visuals = visual::visual_states(&self.placed, &self.config.visual);
        self.hovered = None;
        log::info!(
            "laid out {} items on a sphere of radius {}",
            self.placed.len(),
            self.config.radius
        );

        if self.rotation.target().is_some() {
            self.retarget_selection();
        }
        Ok(())
    }

    /// Recomputes the focus target for the current selection from the
    /// current layout.
    fn retarget_selection(&mut self) {
        let index = self.selection.selected().and_then(|id| self.index_of(id));
        let target = index
            .map(|index| compute_focus_target(&self.placed[index], self.rotation.orientation()));
        if target.is_none() {
            log::debug!("selected item is no longer placed, releasing focus lock");
        }
        self.rotation.set_focus_target(target);
    }

    /// Registers the selection-changed callback, replacing any previous one.
    ///
    /// Hosts that wrap the callback should chain onto
    /// [`SphereGallery::take_on_select`] instead of overwriting it.
    pub fn on_select<F>(&mut self, callback: F)
    where
        F: FnMut(Option<&GalleryItem>) + 'static,
    {
        if self.on_select.is_some() {
            log::debug!("replacing the registered select callback");
        }
        self.on_select = Some(Box::new(callback));
    }

    /// Removes and returns the registered selection-changed callback.
    pub fn take_on_select(&mut self) -> Option<SelectCallback> {
        self.on_select.take()
    }

    /// Updates the viewport size in device pixels.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vector2::new(width.max(0.0), height.max(0.0));
        if width >= 1.0 && height >= 1.0 {
            self.camera.resize_projection(width as u32, height as u32);
        }
    }

    pub fn is_narrow_viewport(&self) -> bool {
        self.viewport.x < self.config.visual.narrow_viewport_width
    }

    /// Queues an input event for the next tick.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Advances the gallery by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        while let Some(event) = self.pending.pop_front() {
            self.route(event);
        }

        self.rotation.tick(dt, self.selection.ever_focused());

        let narrow = self.is_narrow_viewport();
        visual::tick_visuals(
            &mut self.visuals,
            &self.placed,
            dt,
            &self.selection,
            self.hovered,
            narrow,
            &self.config.visual,
        );
    }

    fn route(&mut self, event: InputEvent) {
        let Some(gesture) = self.router.handle(event) else {
            return;
        };

        match gesture {
            Gesture::Pressed { .. } => {
                self.rotation.set_pointer_down(true);
            }
            Gesture::Hover { position } => {
                self.hovered = self.item_at(position);
            }
            Gesture::Leave => {
                self.hovered = None;
            }
            Gesture::DragMotion { delta, first } => {
                if first {
                    // Rotating away from a focused item releases the lock but keeps the selection.
                    self.rotation.set_focus_target(None);
                    self.hovered = None;
                }
                self.rotation.apply_drag_delta(delta);
            }
            Gesture::DragEnd { .. } => {
                self.rotation.set_pointer_down(false);
            }
            Gesture::Click { position } => {
                self.rotation.set_pointer_down(false);
                match self.item_at(position) {
                    Some(id) => {
                        self.select(id);
                    }
                    None => {
                        self.deselect();
                    }
                }
            }
            Gesture::Dismiss => {
                self.deselect();
            }
        }
    }

    /// Item under a pointer position, if any.
    pub fn item_at(&self, position: Vector2<f32>) -> Option<ItemId> {
        let orientation = self.rotation.orientation();
        let targets = self
            .placed
            .iter()
            .zip(&self.visuals)
            .map(|(p, v)| {
                let size = visual::card_dimensions(p.item.aspect, &self.config.visual);
                BillboardTarget {
                    id: p.item.id,
                    center: world_position(p, v, orientation),
                    half_extents: size * (v.current_scale * 0.5),
                }
            });

        self.picker
            .pick(
                (position.x, position.y),
                (self.viewport.x, self.viewport.y),
                &self.camera,
                targets,
            )
            .map(|hit| hit.item_id)
    }

    /// Focuses the item with `id`.
    ///
    /// Returns `false`, leaving everything untouched, when no such item is
    /// placed. Focusing the already focused item re-centres it without
    /// firing the callback.
    pub fn select(&mut self, id: ItemId) -> bool {
        let Some(index) = self.index_of(id) else {
            log::debug!("ignoring selection of unknown item {id}");
            return false;
        };

        let changed = self.selection.select(id);
        self.rotation.stop();
        let target = compute_focus_target(&self.placed[index], self.rotation.orientation());
        self.rotation.set_focus_target(Some(target));

        if changed {
            log::info!("focused item {id}");
            let item = &self.placed[index].item;
            if let Some(callback) = self.on_select.as_mut() {
                callback(Some(item));
            }
        }
        true
    }

    /// Drops the current focus. Returns `false` if nothing was focused.
    ///
    /// The orientation stays wherever the focus animation left it, and the
    /// idle auto-spin does not come back.
    pub fn deselect(&mut self) -> bool {
        if !self.selection.clear() {
            return false;
        }
        self.rotation.set_focus_target(None);
        log::info!("focus cleared");
        if let Some(callback) = self.on_select.as_mut() {
            callback(None);
        }
        true
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.placed.iter().position(|p| p.item.id == id)
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn placed_items(&self) -> &[PlacedItem] {
        &self.placed
    }

    pub fn visual_state(&self, id: ItemId) -> Option<&ItemVisualState> {
        self.index_of(id).map(|index| &self.visuals[index])
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selection.selected()
    }

    pub fn selected_item(&self) -> Option<&GalleryItem> {
        let id = self.selection.selected()?;
        self.index_of(id).map(|index| &self.placed[index].item)
    }

    pub fn hovered_id(&self) -> Option<ItemId> {
        self.hovered
    }

    pub fn orientation(&self) -> Quaternion<f32> {
        self.rotation.orientation()
    }

    pub fn rotation(&self) -> &RotationController {
        &self.rotation
    }

    pub fn camera(&self) -> &ViewerCamera {
        &self.camera
    }

    /// Current world-space facing direction of an item.
    pub fn world_direction(&self, id: ItemId) -> Option<Vector3<f32>> {
        let index = self.index_of(id)?;
        Some(
            self.rotation
                .orientation()
                .rotate_vector(self.placed[index].base_direction),
        )
    }

    /// Render parameters for every item, in layout order.
    pub fn render_params(&self) -> Vec<ItemRenderParams> {
        let orientation = self.rotation.orientation();
        self.placed
            .iter()
            .zip(&self.visuals)
            .map(|(p, v)| ItemRenderParams {
                id: p.item.id,
                world_position: world_position(p, v, orientation),
                scale: v.current_scale,
                size: visual::card_dimensions(p.item.aspect, &self.config.visual),
                glow_intensity: v.current_glow_intensity,
                glow_color: v.current_glow_color,
                tilt_z: v.float_tilt_z,
            })
            .collect()
    }

    pub fn instances(&self) -> Vec<ItemInstance> {
        self.render_params()
            .iter()
            .map(ItemInstance::from_params)
            .collect()
    }
}

fn world_position(
    placed: &PlacedItem,
    visual: &ItemVisualState,
    orientation: Quaternion<f32>,
) -> Vector3<f32> {
    orientation.rotate_vector(placed.base_position) + visual.float_position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::focus::forward_axis;
    use crate::controls::rotation_controller::angle_between;
    use cgmath::InnerSpace;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    fn items(count: u32) -> Vec<GalleryItem> {
        (1..=count)
            .map(|id| {
                GalleryItem::new(id, format!("images/{id}.jpg"))
                    .with_meta(DisplayMeta::titled(format!("Item {id}")))
            })
            .collect()
    }

    fn gallery_with_log(count: u32) -> (SphereGallery, Rc<RefCell<Vec<Option<ItemId>>>>) {
        let mut gallery =
            SphereGallery::with_items(GalleryConfig::default(), items(count)).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        gallery.on_select(move |item| sink.borrow_mut().push(item.map(|i| i.id)));
        (gallery, log)
    }

    /// Pixel position of an item's centre for the gallery's camera.
    fn screen_position(gallery: &SphereGallery, id: ItemId) -> Vector2<f32> {
        let params = gallery.render_params();
        let p = params.iter().find(|p| p.id == id).unwrap();
        let view_proj = gallery.camera().projection_matrix() * gallery.camera().view_matrix();
        let clip = view_proj * p.world_position.extend(1.0);
        let ndc = Vector2::new(clip.x / clip.w, clip.y / clip.w);
        Vector2::new(
            (ndc.x + 1.0) * 0.5 * gallery.viewport.x,
            (1.0 - ndc.y) * 0.5 * gallery.viewport.y,
        )
    }

    fn settle(gallery: &mut SphereGallery, ticks: usize) {
        for _ in 0..ticks {
            gallery.tick(DT);
        }
    }

    #[test]
    fn test_scenario_focus_and_release() {
        let (mut gallery, log) = gallery_with_log(8);
        assert_eq!(gallery.placed_items().len(), 8);

        assert!(gallery.select(3));
        settle(&mut gallery, 300);

        let facing = gallery.world_direction(3).unwrap();
        assert!(facing.angle(forward_axis()).0 < 0.01);
        assert!(gallery.rotation().is_settled());

        let visual = gallery.visual_state(3).unwrap();
        assert!((visual.current_scale - visual.fit_scale()).abs() < 1e-3);

        gallery.push_event(InputEvent::Escape);
        gallery.tick(DT);
        assert_eq!(*log.borrow(), vec![Some(3), None]);

        // Auto-spin stays off after the release.
        let held = gallery.orientation();
        settle(&mut gallery, 120);
        let drift = angle_between(held, gallery.orientation());
        assert!(drift < 1e-6);
        assert!(gallery.selection().ever_focused());
    }

    #[test]
    fn test_click_on_item_focuses_it() {
        let (mut gallery, log) = gallery_with_log(8);
        gallery.select(1);
        settle(&mut gallery, 300);
        gallery.deselect();
        log.borrow_mut().clear();

        // Item 1 now faces the viewer at the centre of the screen.
        let pos = screen_position(&gallery, 1);
        assert!((pos.x - 640.0).abs() < 5.0 && (pos.y - 400.0).abs() < 5.0);

        gallery.push_event(InputEvent::PointerDown { position: pos });
        let release = pos + Vector2::new(3.0, 2.0);
        gallery.push_event(InputEvent::PointerMove { position: release });
        gallery.push_event(InputEvent::PointerUp { position: release });
        gallery.tick(DT);

        assert_eq!(gallery.selected_id(), Some(1));
        assert_eq!(*log.borrow(), vec![Some(1)]);
    }

    #[test]
    fn test_drag_released_over_item_does_not_click() {
        let (mut gallery, log) = gallery_with_log(8);
        gallery.select(1);
        settle(&mut gallery, 300);
        gallery.deselect();
        log.borrow_mut().clear();

        let pos = screen_position(&gallery, 1);
        gallery.push_event(InputEvent::PointerDown { position: pos });
        gallery.push_event(InputEvent::PointerMove {
            position: pos + Vector2::new(9.0, 0.0),
        });
        gallery.push_event(InputEvent::PointerMove { position: pos });
        gallery.push_event(InputEvent::PointerUp { position: pos });
        gallery.tick(DT);

        assert!(log.borrow().is_empty());
        assert_eq!(gallery.selected_id(), None);
        assert!(gallery.rotation().angular_velocity().magnitude() > 0.0);
    }

    #[test]
    fn test_click_on_empty_space_deselects() {
        let (mut gallery, log) = gallery_with_log(8);
        gallery.select(2);
        settle(&mut gallery, 10);

        gallery.push_event(InputEvent::down(2.0, 2.0));
        gallery.push_event(InputEvent::up(2.0, 2.0));
        gallery.tick(DT);

        assert_eq!(gallery.selected_id(), None);
        assert_eq!(*log.borrow(), vec![Some(2), None]);

        // A second empty click has nothing to clear.
        gallery.push_event(InputEvent::down(2.0, 2.0));
        gallery.push_event(InputEvent::up(2.0, 2.0));
        gallery.tick(DT);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_drag_releases_focus_lock_but_keeps_selection() {
        let (mut gallery, _log) = gallery_with_log(8);
        gallery.select(4);
        assert!(gallery.rotation().target().is_some());

        gallery.push_event(InputEvent::down(10.0, 10.0));
        gallery.push_event(InputEvent::moved(60.0, 10.0));
        gallery.tick(DT);

        assert!(gallery.rotation().target().is_none());
        assert_eq!(gallery.selected_id(), Some(4));
    }

    #[test]
    fn test_moves_between_ticks_coalesce() {
        let (mut gallery, _log) = gallery_with_log(8);
        gallery.push_event(InputEvent::down(0.0, 0.0));
        gallery.push_event(InputEvent::moved(20.0, 0.0));
        gallery.push_event(InputEvent::moved(25.0, 0.0));
        gallery.tick(DT);

        // Only the latest sample (5 px) drives the velocity.
        let v = gallery.rotation().angular_velocity();
        assert!((v.y - 5.0 * 0.003).abs() < 1e-6);
        assert_eq!(v.x, 0.0);
    }

    #[test]
    fn test_unknown_selection_is_ignored() {
        let (mut gallery, log) = gallery_with_log(4);
        assert!(!gallery.select(99));
        assert_eq!(gallery.selected_id(), None);
        assert!(!gallery.selection().ever_focused());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_reselect_same_item_fires_once() {
        let (mut gallery, log) = gallery_with_log(4);
        gallery.select(2);
        gallery.select(2);
        gallery.select(3);
        assert_eq!(*log.borrow(), vec![Some(2), Some(3)]);
    }

    #[test]
    fn test_escape_without_selection_is_silent() {
        let (mut gallery, log) = gallery_with_log(4);
        gallery.push_event(InputEvent::Escape);
        gallery.tick(DT);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_stray_pointer_up_is_ignored() {
        let (mut gallery, log) = gallery_with_log(4);
        gallery.push_event(InputEvent::up(640.0, 400.0));
        gallery.tick(DT);
        assert!(log.borrow().is_empty());
        assert!(!gallery.rotation().is_pointer_down());
    }

    #[test]
    fn test_empty_gallery_ticks() {
        let (mut gallery, log) = gallery_with_log(0);
        gallery.push_event(InputEvent::down(640.0, 400.0));
        gallery.push_event(InputEvent::up(640.0, 400.0));
        settle(&mut gallery, 10);
        assert!(gallery.render_params().is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_set_items_rejects_duplicates() {
        let mut gallery = SphereGallery::new(GalleryConfig::default()).unwrap();
        let list = vec![GalleryItem::new(1, "a"), GalleryItem::new(1, "b")];
        assert_eq!(gallery.set_items(list), Err(GalleryError::DuplicateItemId(1)));

        let bad = vec![GalleryItem::new(1, "a").with_aspect(0.0)];
        assert!(matches!(
            gallery.set_items(bad),
            Err(GalleryError::InvalidAspectRatio { id: 1, .. })
        ));
    }

    #[test]
    fn test_replacing_items_keeps_selection() {
        let (mut gallery, _log) = gallery_with_log(8);
        gallery.select(5);
        gallery.set_items(items(3)).unwrap();
        assert_eq!(gallery.placed_items().len(), 3);
        assert_eq!(gallery.selected_id(), Some(5));
        assert!(gallery.selected_item().is_none());
    }

    #[test]
    fn test_replacing_items_retargets_focus() {
        let (mut gallery, log) = gallery_with_log(8);
        gallery.select(5);
        settle(&mut gallery, 300);
        assert!(gallery.world_direction(5).unwrap().angle(forward_axis()).0 < 0.01);

        let mut reordered = items(8);
        reordered.reverse();
        gallery.set_items(reordered).unwrap();
        assert!(gallery.rotation().target().is_some());
        settle(&mut gallery, 600);

        let facing = gallery.world_direction(5).unwrap();
        assert!(facing.angle(forward_axis()).0 < 0.01);
        assert_eq!(*log.borrow(), vec![Some(5)]);
    }

    #[test]
    fn test_replacing_items_drops_stale_focus_lock() {
        let (mut gallery, _log) = gallery_with_log(8);
        gallery.select(5);
        settle(&mut gallery, 30);
        gallery.set_items(items(3)).unwrap();
        assert!(gallery.rotation().target().is_none());
        assert_eq!(gallery.selected_id(), Some(5));
    }

    #[test]
    fn test_render_params_follow_orientation() {
        let (mut gallery, _log) = gallery_with_log(8);
        settle(&mut gallery, 60);
        let orientation = gallery.orientation();
        for (params, placed) in gallery.render_params().iter().zip(gallery.placed_items()) {
            let expected = orientation.rotate_vector(placed.base_position);
            assert!((params.world_position - expected).magnitude() < 1e-5);
            assert!((params.world_position.magnitude() - 6.0).abs() < 1e-3);
        }
        assert_eq!(gallery.instances().len(), 8);
    }

    #[test]
    fn test_hover_scales_item() {
        let (mut gallery, _log) = gallery_with_log(8);
        gallery.select(6);
        settle(&mut gallery, 300);
        gallery.deselect();
        settle(&mut gallery, 300);

        let pos = screen_position(&gallery, 6);
        gallery.push_event(InputEvent::PointerMove { position: pos });
        settle(&mut gallery, 240);

        assert_eq!(gallery.hovered_id(), Some(6));
        let visual = gallery.visual_state(6).unwrap();
        assert!(visual.hovered);
        assert!((visual.current_scale - 1.15).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_leave_clears_hover() {
        let (mut gallery, _log) = gallery_with_log(8);
        gallery.select(6);
        settle(&mut gallery, 300);
        gallery.deselect();

        let pos = screen_position(&gallery, 6);
        gallery.push_event(InputEvent::PointerMove { position: pos });
        settle(&mut gallery, 60);
        assert_eq!(gallery.hovered_id(), Some(6));

        gallery.push_event(InputEvent::PointerLeave);
        settle(&mut gallery, 300);
        assert_eq!(gallery.hovered_id(), None);
        let visual = gallery.visual_state(6).unwrap();
        assert!(!visual.hovered);
        assert!((visual.current_scale - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_take_on_select_hands_over_callback() {
        let (mut gallery, log) = gallery_with_log(4);
        let mut taken = gallery.take_on_select().unwrap();
        gallery.select(1);
        assert!(log.borrow().is_empty());

        taken(None);
        assert_eq!(*log.borrow(), vec![None]);
    }

    #[test]
    fn test_narrow_viewport_shrinks_items() {
        let (mut gallery, _log) = gallery_with_log(4);
        gallery.set_viewport(600.0, 900.0);
        assert!(gallery.is_narrow_viewport());
        settle(&mut gallery, 300);
        let visual = gallery.visual_state(1).unwrap();
        assert!((visual.current_scale - 0.7).abs() < 1e-3);
    }
}
