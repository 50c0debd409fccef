//! # Rotation Controller
//!
//! Single owner of the gallery orientation. Drag input, the idle auto-spin
//! and focus lock all feed into one [`OrientationState`] that is advanced
//! once per frame by [`RotationController::tick`], with a fixed precedence:
//!
//! 1. A focus target, when present, overrides everything else: the
//!    orientation slerps toward it with factor `1 - e^(-rate * dt)`.
//! 2. Otherwise the auto-spin turns the gallery about the vertical axis
//!    (only before anything was ever focused and while the pointer is up),
//!    then the angular velocity is applied as a yaw rotation followed by a
//!    pitch rotation, both left-multiplied onto the orientation, and finally
//!    decays by the damping factor while the pointer is up.
//!
//! The yaw-then-pitch order is part of the contract: the two rotations do
//! not commute and swapping them changes how a drag feels.

use cgmath::{InnerSpace, One, Quaternion, Rad, Rotation3, Vector2, Vector3, Zero};

use crate::config::RotationConfig;

/// Orientation of the whole gallery plus its inertia.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    /// Always a unit quaternion; renormalised after every composition.
    pub orientation: Quaternion<f32>,
    /// `x` is the pitch rate, `y` the yaw rate, in radians per tick.
    pub angular_velocity: Vector2<f32>,
    /// Focus target, present while a focus transition is in flight or locked.
    pub target: Option<Quaternion<f32>>,
}

impl Default for OrientationState {
    fn default() -> Self {
        Self {
            orientation: Quaternion::one(),
            angular_velocity: Vector2::zero(),
            target: None,
        }
    }
}

pub struct RotationController {
    pub config: RotationConfig,
    state: OrientationState,
    pointer_down: bool,
}

impl RotationController {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            state: OrientationState::default(),
            pointer_down: false,
        }
    }

    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    pub fn orientation(&self) -> Quaternion<f32> {
        self.state.orientation
    }

    pub fn angular_velocity(&self) -> Vector2<f32> {
        self.state.angular_velocity
    }

    pub fn target(&self) -> Option<Quaternion<f32>> {
        self.state.target
    }

    pub fn set_orientation(&mut self, orientation: Quaternion<f32>) {
        self.state.orientation = orientation.normalize();
    }

    pub fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Converts one drag motion sample (pixels) into angular velocity.
    ///
    /// Vertical motion pitches, horizontal motion yaws. The sample replaces
    /// the previous velocity, so several moves between two ticks coalesce
    /// into the latest one.
    pub fn apply_drag_delta(&mut self, pixel_delta: Vector2<f32>) {
        let sensitivity = self.config.sensitivity;
        self.state.angular_velocity =
            Vector2::new(pixel_delta.y * sensitivity, pixel_delta.x * sensitivity);
    }

    pub fn stop(&mut self) {
        self.state.angular_velocity = Vector2::zero();
    }

    /// Sets or clears the focus target. Last write wins.
    pub fn set_focus_target(&mut self, target: Option<Quaternion<f32>>) {
        self.state.target = target.map(|q| q.normalize());
    }

    /// Angle in radians between the current orientation and the focus target.
    pub fn remaining_angle(&self) -> Option<f32> {
        self.state
            .target
            .map(|target| angle_between(self.state.orientation, target))
    }

    /// True once a focus target is within the settle epsilon.
    ///
    /// Convergence is asymptotic and no arrival event is emitted; this is a
    /// query for hosts that want to know the lock has visually landed.
    pub fn is_settled(&self) -> bool {
        self.remaining_angle()
            .map_or(false, |angle| angle < self.config.settle_epsilon)
    }

    /// Advances the orientation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, ever_focused: bool) {
        if let Some(target) = self.state.target {
            let factor = 1.0 - (-self.config.focus_rate * dt).exp();
            self.state.orientation = slerp_shortest(self.state.orientation, target, factor);
            log::trace!(
                "focus lock: {:.5} rad remaining",
                angle_between(self.state.orientation, target)
            );
            return;
        }

        let mut orientation = self.state.orientation;

        if !ever_focused && !self.pointer_down {
            let spin = Quaternion::from_axis_angle(
                Vector3::unit_y(),
                Rad(self.config.auto_spin_speed * dt),
            );
            orientation = spin * orientation;
        }

        let velocity = self.state.angular_velocity;
        let epsilon = self.config.velocity_epsilon;
        if velocity.x.abs() > epsilon || velocity.y.abs() > epsilon {
            let yaw = Quaternion::from_axis_angle(Vector3::unit_y(), Rad(velocity.y));
            let pitch = Quaternion::from_axis_angle(Vector3::unit_x(), Rad(velocity.x));
            orientation = pitch * (yaw * orientation);
        }

        self.state.orientation = orientation.normalize();

        if !self.pointer_down {
            self.state.angular_velocity *= self.config.damping;
        }
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(RotationConfig::default())
    }
}

/// Slerp along the shorter arc. `q` and `-q` are the same rotation, so the
/// target is flipped into the hemisphere of `from` first.
pub fn slerp_shortest(from: Quaternion<f32>, to: Quaternion<f32>, amount: f32) -> Quaternion<f32> {
    let to = if from.dot(to) < 0.0 { -to } else { to };
    from.slerp(to, amount.clamp(0.0, 1.0)).normalize()
}

/// Rotation angle in radians taking `a` to `b`, accurate near zero.
pub fn angle_between(a: Quaternion<f32>, b: Quaternion<f32>) -> f32 {
    let relative = a.conjugate() * b;
    2.0 * relative.v.magnitude().atan2(relative.s.abs())
}
