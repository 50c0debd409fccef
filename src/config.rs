//! # Gallery Configuration
//!
//! Every tunable constant of the gallery lives in [`GalleryConfig`]. The
//! defaults reproduce the reference feel: a radius-6 sphere viewed from 18
//! units away, 8 px drag slop, 0.92 per-tick inertia and a slow idle spin.
//!
//! ```rust
//! use spherefolio::config::GalleryConfig;
//!
//! let config = GalleryConfig {
//!     radius: 8.0,
//!     ..GalleryConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use cgmath::{Deg, Vector3};

use crate::error::{GalleryError, Result};

/// Linear RGB colour, each channel in `0.0..=1.0`.
pub type Rgb = Vector3<f32>;

/// Target glow for one visual state (selected, hovered, idle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowPreset {
    pub intensity: f32,
    pub color: Rgb,
}

impl GlowPreset {
    pub fn new(intensity: f32, color: [f32; 3]) -> Self {
        Self {
            intensity,
            color: Vector3::new(color[0], color[1], color[2]),
        }
    }
}

/// Pointer thresholds and drag sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    /// Distance in pixels after which a gesture rotates the gallery.
    pub drag_threshold: f32,
    /// Distance in pixels after which a press on an item no longer counts as a click.
    pub item_click_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 8.0,
            item_click_threshold: 10.0,
        }
    }
}

/// Rotation, inertia and focus-lock parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationConfig {
    /// Radians of rotation per pixel of drag, applied to both axes.
    pub sensitivity: f32,
    /// Per-tick multiplier applied to angular velocity while the pointer is up.
    pub damping: f32,
    /// Per-axis velocity below which no incremental rotation is applied.
    pub velocity_epsilon: f32,
    /// Idle spin about the vertical axis, radians per second.
    pub auto_spin_speed: f32,
    /// Rate constant of the exponential approach toward a focus target (1/s).
    pub focus_rate: f32,
    /// Angular distance (radians) under which a focus target counts as reached.
    pub settle_epsilon: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.003,
            damping: 0.92,
            velocity_epsilon: 1.0e-4,
            auto_spin_speed: 0.08,
            focus_rate: 3.0,
            settle_epsilon: 1.0e-3,
        }
    }
}

/// Per-item scale, glow and idle-float parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualConfig {
    /// Card width in world units; height follows from the item's aspect ratio.
    pub card_width: f32,
    /// Side of the square box a focused item's longer dimension is scaled to fill.
    pub focus_box: f32,
    pub hover_scale: f32,
    /// Rate constant for scale and glow smoothing (1/s).
    pub scale_rate: f32,
    /// Rate constant for float offsets settling back to rest (1/s).
    pub settle_rate: f32,
    /// Viewport width in pixels below which the narrow multiplier applies.
    pub narrow_viewport_width: f32,
    pub narrow_scale_multiplier: f32,
    /// Vertical, horizontal and tilt amplitudes of the idle float.
    pub float_amplitude: Vector3<f32>,
    /// Angular frequencies (rad/s) matching `float_amplitude`.
    pub float_frequency: Vector3<f32>,
    pub selected_glow: GlowPreset,
    pub hovered_glow: GlowPreset,
    pub idle_glow: GlowPreset,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            card_width: 2.5,
            focus_box: 6.0,
            hover_scale: 1.15,
            scale_rate: 5.0,
            settle_rate: 3.0,
            narrow_viewport_width: 768.0,
            narrow_scale_multiplier: 0.7,
            float_amplitude: Vector3::new(0.15, 0.08, 0.05),
            float_frequency: Vector3::new(1.2, 0.9, 0.7),
            selected_glow: GlowPreset::new(1.0, [0.23, 0.51, 0.96]),
            hovered_glow: GlowPreset::new(0.45, [1.0, 1.0, 1.0]),
            idle_glow: GlowPreset::new(0.02, [1.0, 1.0, 1.0]),
        }
    }
}

/// Fixed viewer placement used for picking and the view-projection uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Distance of the eye from the sphere centre along +Z.
    pub distance: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 18.0,
            fovy: Deg(50.0),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

/// Complete gallery configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryConfig {
    pub radius: f32,
    pub input: InputConfig,
    pub rotation: RotationConfig,
    pub visual: VisualConfig,
    pub camera: CameraConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            radius: 6.0,
            input: InputConfig::default(),
            rotation: RotationConfig::default(),
            visual: VisualConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Checks that every value is usable.
    ///
    /// Returns the first offending field. The damping factor must lie in
    /// `(0, 1)` so inertia decays without reversing sign, and the camera must
    /// sit outside the sphere.
    pub fn validate(&self) -> Result<()> {
        positive("radius", self.radius)?;
        positive("input.drag_threshold", self.input.drag_threshold)?;
        positive("input.item_click_threshold", self.input.item_click_threshold)?;
        positive("rotation.sensitivity", self.rotation.sensitivity)?;
        positive("rotation.focus_rate", self.rotation.focus_rate)?;
        positive("rotation.settle_epsilon", self.rotation.settle_epsilon)?;
        non_negative("rotation.auto_spin_speed", self.rotation.auto_spin_speed)?;
        non_negative("rotation.velocity_epsilon", self.rotation.velocity_epsilon)?;

        let damping = self.rotation.damping;
        if !(damping > 0.0 && damping < 1.0) {
            return Err(GalleryError::InvalidConfig {
                field: "rotation.damping",
                reason: format!("must be strictly between 0 and 1, got {damping}"),
            });
        }

        positive("visual.card_width", self.visual.card_width)?;
        positive("visual.focus_box", self.visual.focus_box)?;
        positive("visual.hover_scale", self.visual.hover_scale)?;
        positive("visual.scale_rate", self.visual.scale_rate)?;
        positive("visual.settle_rate", self.visual.settle_rate)?;
        positive("visual.narrow_scale_multiplier", self.visual.narrow_scale_multiplier)?;

        positive("camera.znear", self.camera.znear)?;
        if self.camera.zfar <= self.camera.znear {
            return Err(GalleryError::InvalidConfig {
                field: "camera.zfar",
                reason: "must be greater than camera.znear".to_string(),
            });
        }
        if self.camera.distance <= self.radius {
            return Err(GalleryError::InvalidConfig {
                field: "camera.distance",
                reason: format!(
                    "eye at {} would sit inside the sphere of radius {}",
                    self.camera.distance, self.radius
                ),
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GalleryError::InvalidConfig {
            field,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GalleryError::InvalidConfig {
            field,
            reason: format!("must be zero or positive, got {value}"),
        })
    }
}
