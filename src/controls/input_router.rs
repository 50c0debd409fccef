//! # Input Router
//!
//! Turns raw pointer and keyboard events into gestures. Every completed
//! down→up cycle resolves to exactly one of [`Gesture::Click`] or
//! [`Gesture::DragEnd`], never both.
//!
//! Two thresholds are tracked independently for the same cycle: the gallery
//! rotates once the pointer travels past `drag_threshold` from where it went
//! down, and a press on an item stops being a click past
//! `item_click_threshold`. Crossing either one turns the cycle into a drag.
//! Once a cycle is a drag it stays a drag until release.

use cgmath::{MetricSpace, Vector2};

use crate::config::InputConfig;

/// Raw input in device pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Vector2<f32> },
    PointerMove { position: Vector2<f32> },
    PointerUp { position: Vector2<f32> },
    /// The pointer left the surface.
    PointerLeave,
    Escape,
}

impl InputEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            position: Vector2::new(x, y),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::PointerMove {
            position: Vector2::new(x, y),
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::PointerUp {
            position: Vector2::new(x, y),
        }
    }
}

/// What a single input event means to the gallery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// A pointer button went down; inertia stops decaying until release.
    Pressed { position: Vector2<f32> },
    /// Pointer motion that is not rotating the gallery.
    Hover { position: Vector2<f32> },
    /// Incremental motion of a drag. `first` is set on the event that
    /// crossed the threshold.
    DragMotion { delta: Vector2<f32>, first: bool },
    /// A cycle released without crossing either threshold.
    Click { position: Vector2<f32> },
    /// A cycle released after it became a drag.
    DragEnd { total: Vector2<f32> },
    /// The pointer left the surface; nothing is hovered any more.
    Leave,
    /// Escape: drop any focus regardless of pointer state.
    Dismiss,
}

/// Per-cycle state, discarded on release.
#[derive(Debug, Clone, Copy)]
struct PointerCycle {
    start: Vector2<f32>,
    last: Vector2<f32>,
    rotating: bool,
    click_cancelled: bool,
}

impl PointerCycle {
    fn new(position: Vector2<f32>) -> Self {
        Self {
            start: position,
            last: position,
            rotating: false,
            click_cancelled: false,
        }
    }

    fn is_drag(&self) -> bool {
        self.rotating || self.click_cancelled
    }
}

pub struct InputRouter {
    config: InputConfig,
    cycle: Option<PointerCycle>,
}

impl InputRouter {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            cycle: None,
        }
    }

    pub fn is_pointer_down(&self) -> bool {
        self.cycle.is_some()
    }

    /// True while the current cycle is rotating the gallery.
    pub fn is_dragging(&self) -> bool {
        self.cycle.map_or(false, |cycle| cycle.rotating)
    }

    /// Routes one event. Returns `None` for events that carry no meaning,
    /// such as a release with no matching press.
    pub fn handle(&mut self, event: InputEvent) -> Option<Gesture> {
        match event {
            InputEvent::PointerDown { position } => {
                if self.cycle.is_some() {
                    log::debug!("pointer down while already down, restarting gesture");
                }
                self.cycle = Some(PointerCycle::new(position));
                Some(Gesture::Pressed { position })
            }
            InputEvent::PointerMove { position } => {
                let Some(cycle) = self.cycle.as_mut() else {
                    return Some(Gesture::Hover { position });
                };

                let travelled = cycle.start.distance(position);
                if travelled > self.config.item_click_threshold {
                    cycle.click_cancelled = true;
                }

                let mut first = false;
                if !cycle.rotating && travelled > self.config.drag_threshold {
                    cycle.rotating = true;
                    first = true;
                }

                let delta = position - cycle.last;
                cycle.last = position;

                if cycle.rotating {
                    Some(Gesture::DragMotion { delta, first })
                } else {
                    Some(Gesture::Hover { position })
                }
            }
            InputEvent::PointerUp { position } => {
                let Some(cycle) = self.cycle.take() else {
                    log::debug!("pointer up without a matching pointer down, ignored");
                    return None;
                };

                if cycle.is_drag() {
                    Some(Gesture::DragEnd {
                        total: position - cycle.start,
                    })
                } else {
                    Some(Gesture::Click { position })
                }
            }
            InputEvent::PointerLeave => Some(Gesture::Leave),
            InputEvent::Escape => Some(Gesture::Dismiss),
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(router: &mut InputRouter, events: &[InputEvent]) -> Vec<Gesture> {
        events.iter().filter_map(|e| router.handle(*e)).collect()
    }

    fn clicks(gestures: &[Gesture]) -> usize {
        gestures
            .iter()
            .filter(|g| matches!(g, Gesture::Click { .. }))
            .count()
    }

    fn drag_ends(gestures: &[Gesture]) -> usize {
        gestures
            .iter()
            .filter(|g| matches!(g, Gesture::DragEnd { .. }))
            .count()
    }

    #[test]
    fn test_small_motion_is_click() {
        let mut router = InputRouter::default();
        let gestures = run(
            &mut router,
            &[
                InputEvent::down(100.0, 100.0),
                InputEvent::moved(104.0, 105.0),
                InputEvent::up(104.0, 105.0),
            ],
        );
        assert_eq!(clicks(&gestures), 1);
        assert_eq!(drag_ends(&gestures), 0);
        assert_eq!(
            gestures.last(),
            Some(&Gesture::Click {
                position: Vector2::new(104.0, 105.0)
            })
        );
    }

    #[test]
    fn test_seven_pixels_still_clicks() {
        let mut router = InputRouter::default();
        let gestures = run(
            &mut router,
            &[
                InputEvent::down(0.0, 0.0),
                InputEvent::moved(7.0, 0.0),
                InputEvent::up(7.0, 0.0),
            ],
        );
        assert_eq!(clicks(&gestures), 1);
        assert!(!gestures.iter().any(|g| matches!(g, Gesture::DragMotion { .. })));
    }

    #[test]
    fn test_nine_pixels_is_drag_not_click() {
        let mut router = InputRouter::default();
        let gestures = run(
            &mut router,
            &[
                InputEvent::down(0.0, 0.0),
                InputEvent::moved(9.0, 0.0),
                // Back over the starting point before release.
                InputEvent::moved(0.0, 0.0),
                InputEvent::up(0.0, 0.0),
            ],
        );
        assert_eq!(clicks(&gestures), 0);
        assert_eq!(drag_ends(&gestures), 1);
        assert_eq!(
            gestures[1],
            Gesture::DragMotion {
                delta: Vector2::new(9.0, 0.0),
                first: true
            }
        );
        assert_eq!(
            gestures[2],
            Gesture::DragMotion {
                delta: Vector2::new(-9.0, 0.0),
                first: false
            }
        );
    }

    #[test]
    fn test_threshold_uses_euclidean_distance() {
        let mut router = InputRouter::default();
        // 6.5 px on each axis is 9.19 px away.
        let gestures = run(
            &mut router,
            &[
                InputEvent::down(0.0, 0.0),
                InputEvent::moved(6.5, 6.5),
                InputEvent::up(6.5, 6.5),
            ],
        );
        assert_eq!(drag_ends(&gestures), 1);
        assert_eq!(clicks(&gestures), 0);
    }

    #[test]
    fn test_item_threshold_cancels_click_independently() {
        let mut router = InputRouter::new(InputConfig {
            drag_threshold: 20.0,
            item_click_threshold: 10.0,
        });
        let gestures = run(
            &mut router,
            &[
                InputEvent::down(0.0, 0.0),
                InputEvent::moved(12.0, 0.0),
                InputEvent::up(12.0, 0.0),
            ],
        );
        assert_eq!(clicks(&gestures), 0);
        assert_eq!(drag_ends(&gestures), 1);
        assert!(!gestures.iter().any(|g| matches!(g, Gesture::DragMotion { .. })));
    }

    #[test]
    fn test_exactly_at_threshold_still_clicks() {
        let mut router = InputRouter::default();
        let gestures = run(
            &mut router,
            &[
                InputEvent::down(0.0, 0.0),
                InputEvent::moved(8.0, 0.0),
                InputEvent::up(8.0, 0.0),
            ],
        );
        assert_eq!(clicks(&gestures), 1);
        assert_eq!(drag_ends(&gestures), 0);
        assert!(!router.is_dragging());
    }

    #[test]
    fn test_leave_keeps_gesture_alive() {
        let mut router = InputRouter::default();
        router.handle(InputEvent::down(0.0, 0.0));
        router.handle(InputEvent::moved(30.0, 0.0));
        assert_eq!(router.handle(InputEvent::PointerLeave), Some(Gesture::Leave));
        assert!(router.is_dragging());
        assert!(matches!(
            router.handle(InputEvent::up(30.0, 0.0)),
            Some(Gesture::DragEnd { .. })
        ));
    }

    #[test]
    fn test_up_without_down_is_ignored() {
        let mut router = InputRouter::default();
        assert_eq!(router.handle(InputEvent::up(5.0, 5.0)), None);
        assert!(!router.is_pointer_down());
    }

    #[test]
    fn test_escape_always_dismisses() {
        let mut router = InputRouter::default();
        router.handle(InputEvent::down(0.0, 0.0));
        router.handle(InputEvent::moved(30.0, 0.0));
        assert!(router.is_dragging());
        assert_eq!(router.handle(InputEvent::Escape), Some(Gesture::Dismiss));
    }

    #[test]
    fn test_drag_state_resets_each_cycle() {
        let mut router = InputRouter::default();
        let first = run(
            &mut router,
            &[
                InputEvent::down(0.0, 0.0),
                InputEvent::moved(50.0, 0.0),
                InputEvent::up(50.0, 0.0),
            ],
        );
        assert_eq!(drag_ends(&first), 1);

        let second = run(
            &mut router,
            &[InputEvent::down(50.0, 0.0), InputEvent::up(51.0, 0.0)],
        );
        assert_eq!(clicks(&second), 1);
    }
}
