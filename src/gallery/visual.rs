//! # Per-Item Visual State
//!
//! Each placed item carries an [`ItemVisualState`] that is nudged toward its
//! targets every frame by exponential smoothing, `x += (target - x) * (1 - e^(-rate * dt))`:
//!
//! | state                   | scale target   | glow            |
//! |-------------------------|----------------|-----------------|
//! | selected                | fit-to-frame   | strong, accent  |
//! | hovered (not selected)  | `hover_scale`  | medium          |
//! | otherwise               | `1.0`          | near zero       |
//!
//! On narrow viewports every scale target is multiplied by
//! `narrow_scale_multiplier`.
//!
//! While some item is selected, every *other* item drifts in an idle float:
//! independent sinusoids for vertical offset, horizontal offset and Z tilt,
//! phase-shifted per item by a value derived from its id. The selected item,
//! and all items when nothing is selected, settle back to rest at
//! `settle_rate` instead of snapping.
//!
//! This state is durable across frames. Hover comes in from outside each
//! tick; nothing here depends on the pointer gesture in progress.

use cgmath::{Vector2, Vector3, Zero};

use crate::config::{Rgb, VisualConfig};

use super::item::{GalleryItem, ItemId};
use super::layout::PlacedItem;
use super::selection::SelectionState;

/// Fraction of the remaining distance covered in `dt` at `rate` per second.
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Deterministic float phase in `[0, 2π)` for an item id.
pub fn float_phase(id: ItemId) -> f32 {
    const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
    ((id as f64 * GOLDEN_RATIO_CONJUGATE).fract() * std::f64::consts::TAU) as f32
}

/// Card dimensions in world units: fixed width, height from the aspect ratio.
pub fn card_dimensions(aspect: f32, config: &VisualConfig) -> Vector2<f32> {
    Vector2::new(config.card_width, config.card_width / aspect)
}

/// Scale at which the card's longer side exactly fills the focus box.
pub fn fit_to_frame_scale(aspect: f32, config: &VisualConfig) -> f32 {
    let size = card_dimensions(aspect, config);
    config.focus_box / size.x.max(size.y)
}

/// Inputs for one item for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisualContext {
    pub selected: bool,
    pub hovered: bool,
    pub any_selected: bool,
    pub narrow_viewport: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemVisualState {
    pub hovered: bool,
    pub current_scale: f32,
    pub current_glow_intensity: f32,
    pub current_glow_color: Rgb,
    /// Idle float offset, added to the item's world position.
    pub float_position: Vector3<f32>,
    pub float_tilt_z: f32,
    fit_scale: f32,
    phase: f32,
    elapsed: f32,
}

impl ItemVisualState {
    pub fn new(item: &GalleryItem, config: &VisualConfig) -> Self {
        Self {
            hovered: false,
            current_scale: 1.0,
            current_glow_intensity: config.idle_glow.intensity,
            current_glow_color: config.idle_glow.color,
            float_position: Vector3::zero(),
            float_tilt_z: 0.0,
            fit_scale: fit_to_frame_scale(item.aspect, config),
            phase: float_phase(item.id),
            elapsed: 0.0,
        }
    }

    pub fn fit_scale(&self) -> f32 {
        self.fit_scale
    }

    pub fn target_scale(&self, ctx: &VisualContext, config: &VisualConfig) -> f32 {
        let base = if ctx.selected {
            self.fit_scale
        } else if ctx.hovered {
            config.hover_scale
        } else {
            1.0
        };
        if ctx.narrow_viewport {
            base * config.narrow_scale_multiplier
        } else {
            base
        }
    }

    /// Where the idle float wants to be at the current time.
    fn float_target(&self, config: &VisualConfig) -> (Vector3<f32>, f32) {
        let t = self.elapsed;
        let amp = config.float_amplitude;
        let freq = config.float_frequency;
        let offset = Vector3::new(
            amp.y * (freq.y * t + self.phase * 1.3).cos(),
            amp.x * (freq.x * t + self.phase).sin(),
            0.0,
        );
        let tilt = amp.z * (freq.z * t + self.phase * 0.7).sin();
        (offset, tilt)
    }

    pub fn tick(&mut self, dt: f32, ctx: &VisualContext, config: &VisualConfig) {
        self.hovered = ctx.hovered;
        self.elapsed += dt.max(0.0);

        let k = smoothing_factor(config.scale_rate, dt);
        let target_scale = self.target_scale(ctx, config);
        self.current_scale += (target_scale - self.current_scale) * k;

        let glow = if ctx.selected {
            config.selected_glow
        } else if ctx.hovered {
            config.hovered_glow
        } else {
            config.idle_glow
        };
        self.current_glow_intensity += (glow.intensity - self.current_glow_intensity) * k;
        self.current_glow_color += (glow.color - self.current_glow_color) * k;

        let (float_target, tilt_target) = if ctx.any_selected && !ctx.selected {
            self.float_target(config)
        } else {
            (Vector3::zero(), 0.0)
        };
        let settle = smoothing_factor(config.settle_rate, dt);
        self.float_position += (float_target - self.float_position) * settle;
        self.float_tilt_z += (tilt_target - self.float_tilt_z) * settle;
    }
}

/// Builds one visual state per placed item, in layout order.
pub fn visual_states(placed: &[PlacedItem], config: &VisualConfig) -> Vec<ItemVisualState> {
    placed
        .iter()
        .map(|p| ItemVisualState::new(&p.item, config))
        .collect()
}

/// Advances every item's visual state by one frame.
///
/// `states` must be aligned with `placed`.
pub fn tick_visuals(
    states: &mut [ItemVisualState],
    placed: &[PlacedItem],
    dt: f32,
    selection: &SelectionState,
    hovered: Option<ItemId>,
    narrow_viewport: bool,
    config: &VisualConfig,
) {
    let any_selected = selection.has_selection();
    for (state, p) in states.iter_mut().zip(placed) {
        let ctx = VisualContext {
            selected: selection.is_selected(p.item.id),
            hovered: hovered == Some(p.item.id),
            any_selected,
            narrow_viewport,
        };
        state.tick(dt, &ctx, config);
    }
}
