//! Pointer gesture state machine.
//!
//! One pointer:  Idle → Dragging → Idle (tap or pan)
//! Two pointers: pinch. Pan is suspended until every pointer lifts, and a
//! gesture that ever pinched never ends as a tap.
//!
//! The state machine only emits effects; the controller applies them to
//! the camera and runs hit-testing.

use std::time::Duration;

use super::{InteractionConfig, PointerEvent, PointerId};
use crate::geom::Point;

/// What a single event asks of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    None,
    /// Screen-space drag delta since the previous sample.
    Pan(Point),
    /// Multiplicative zoom (pinch ratio or wheel step).
    Zoom(f32),
    /// Confirmed tap at this screen position.
    Tap(Point),
}

#[derive(Debug, Clone, Default)]
pub struct GestureState {
    pointers: Vec<(PointerId, Point)>,
    is_dragging: bool,
    has_moved: bool,
    pinched: bool,
    gesture_start: Point,
    gesture_start_time: Duration,
    last_pointer: Point,
    pinch_distance: Option<f32>,
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch_distance.is_some()
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Forget every pointer (teardown, focus loss).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn on_event(&mut self, event: PointerEvent, cfg: &InteractionConfig) -> GestureEffect {
        match event {
            PointerEvent::Down { id, pos, at } => self.down(id, pos, at),
            PointerEvent::Move { id, pos } => self.moved(id, pos, cfg),
            PointerEvent::Up { id, pos, at } => self.up(id, pos, at, cfg),
            PointerEvent::Cancel { id } => {
                self.release(id);
                GestureEffect::None
            }
            PointerEvent::Wheel { delta } => wheel(delta, cfg),
        }
    }

    fn slot(&mut self, id: PointerId) -> Option<&mut Point> {
        self.pointers.iter_mut().find(|(p, _)| *p == id).map(|(_, pos)| pos)
    }

    fn down(&mut self, id: PointerId, pos: Point, at: Duration) -> GestureEffect {
        if let Some(slot) = self.slot(id) {
            // Repeated down for a pointer we already track.
            *slot = pos;
            return GestureEffect::None;
        }
        match self.pointers.len() {
            0 => {
                self.pointers.push((id, pos));
                self.is_dragging = true;
                self.has_moved = false;
                self.pinched = false;
                self.gesture_start = pos;
                self.gesture_start_time = at;
                self.last_pointer = pos;
                self.pinch_distance = None;
                log::trace!("gesture: drag start at ({:.1}, {:.1})", pos.x, pos.y);
            }
            1 => {
                self.pointers.push((id, pos));
                self.is_dragging = false;
                self.pinched = true;
                self.pinch_distance = Some(self.pointers[0].1.distance(pos));
                log::trace!("gesture: pinch start");
            }
            // Third and later fingers are ignored.
            _ => {}
        }
        GestureEffect::None
    }

    fn moved(&mut self, id: PointerId, pos: Point, cfg: &InteractionConfig) -> GestureEffect {
        let Some(slot) = self.slot(id) else {
            return GestureEffect::None;
        };
        *slot = pos;

        if let Some(previous) = self.pinch_distance {
            if self.pointers.len() < 2 {
                return GestureEffect::None;
            }
            let current = self.pointers[0].1.distance(self.pointers[1].1);
            self.pinch_distance = Some(current);
            if previous > f32::EPSILON && current > f32::EPSILON {
                return GestureEffect::Zoom(current / previous);
            }
            return GestureEffect::None;
        }

        if !self.is_dragging {
            return GestureEffect::None;
        }
        if !self.has_moved && self.beyond_threshold(pos, cfg) {
            self.has_moved = true;
            log::trace!("gesture: drag became pan");
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        if self.has_moved {
            GestureEffect::Pan(delta)
        } else {
            GestureEffect::None
        }
    }

    fn up(&mut self, id: PointerId, pos: Point, at: Duration, cfg: &InteractionConfig) -> GestureEffect {
        if self.slot(id).is_none() {
            // Up without a matching down.
            return GestureEffect::None;
        }
        // The release point counts as the last sample of the drag.
        if self.is_dragging && self.beyond_threshold(pos, cfg) {
            self.has_moved = true;
        }
        let was_tap_candidate = self.is_dragging && !self.has_moved && !self.pinched;
        let elapsed = at.saturating_sub(self.gesture_start_time);
        self.release(id);
        if !self.pointers.is_empty() {
            return GestureEffect::None;
        }
        if was_tap_candidate && elapsed < Duration::from_millis(cfg.tap_window_ms) {
            GestureEffect::Tap(pos)
        } else {
            GestureEffect::None
        }
    }

    fn beyond_threshold(&self, pos: Point, cfg: &InteractionConfig) -> bool {
        let travel = pos - self.gesture_start;
        travel.x.abs() > cfg.move_threshold || travel.y.abs() > cfg.move_threshold
    }

    fn release(&mut self, id: PointerId) {
        self.pointers.retain(|(p, _)| *p != id);
        match self.pointers.len() {
            0 => self.clear(),
            // Leaving a pinch: the remaining finger neither pans nor taps.
            1 => {
                self.pinch_distance = None;
                self.is_dragging = false;
            }
            _ => {}
        }
    }
}

/// Positive `delta` (scrolled up/away) zooms in one step.
fn wheel(delta: f32, cfg: &InteractionConfig) -> GestureEffect {
    if delta > 0.0 {
        GestureEffect::Zoom(cfg.wheel_zoom_in)
    } else if delta < 0.0 {
        GestureEffect::Zoom(cfg.wheel_zoom_out)
    } else {
        GestureEffect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn down(id: PointerId, x: f32, y: f32, at: u64) -> PointerEvent {
        PointerEvent::Down {
            id,
            pos: Point::new(x, y),
            at: ms(at),
        }
    }

    fn mv(id: PointerId, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            id,
            pos: Point::new(x, y),
        }
    }

    fn up(id: PointerId, x: f32, y: f32, at: u64) -> PointerEvent {
        PointerEvent::Up {
            id,
            pos: Point::new(x, y),
            at: ms(at),
        }
    }

    #[test]
    fn test_quick_release_is_tap() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        g.on_event(down(0, 100.0, 100.0, 1000), &cfg);
        assert!(g.is_dragging());
        g.on_event(mv(0, 102.0, 101.0), &cfg);
        let fx = g.on_event(up(0, 102.0, 101.0, 1120), &cfg);
        assert_eq!(fx, GestureEffect::Tap(Point::new(102.0, 101.0)));
        assert!(g.is_idle());
    }

    #[test]
    fn test_slow_release_is_not_tap() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        g.on_event(down(0, 100.0, 100.0, 0), &cfg);
        assert_eq!(g.on_event(up(0, 100.0, 100.0, 500), &cfg), GestureEffect::None);
        g.on_event(down(0, 100.0, 100.0, 1000), &cfg);
        assert_eq!(g.on_event(up(0, 100.0, 100.0, 1300), &cfg), GestureEffect::None);
    }

    #[test]
    fn test_drag_pans_after_threshold() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        g.on_event(down(0, 0.0, 0.0, 0), &cfg);
        assert_eq!(g.on_event(mv(0, 2.0, 0.0), &cfg), GestureEffect::None);
        assert_eq!(g.on_event(mv(0, 10.0, 0.0), &cfg), GestureEffect::Pan(Point::new(8.0, 0.0)));
        assert!(g.has_moved());
        assert_eq!(g.on_event(mv(0, 10.0, 5.0), &cfg), GestureEffect::Pan(Point::new(0.0, 5.0)));
        // A pan never ends in a tap, however quick.
        assert_eq!(g.on_event(up(0, 10.0, 5.0, 50), &cfg), GestureEffect::None);
    }

    #[test]
    fn test_release_far_from_press_is_not_tap() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        g.on_event(down(0, 100.0, 100.0, 0), &cfg);
        assert_eq!(g.on_event(up(0, 300.0, 100.0, 100), &cfg), GestureEffect::None);
        assert!(g.is_idle());

        // Within the threshold on both axes it is still a tap.
        g.on_event(down(0, 100.0, 100.0, 1000), &cfg);
        let fx = g.on_event(up(0, 103.0, 97.0, 1100), &cfg);
        assert_eq!(fx, GestureEffect::Tap(Point::new(103.0, 97.0)));
    }

    #[test]
    fn test_hover_and_stale_up_are_noops() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        assert_eq!(g.on_event(mv(0, 5.0, 5.0), &cfg), GestureEffect::None);
        assert_eq!(g.on_event(up(7, 5.0, 5.0, 10), &cfg), GestureEffect::None);
        assert!(g.is_idle());
    }

    #[test]
    fn test_pinch_ratio_and_suspended_pan() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        g.on_event(down(1, 100.0, 100.0, 0), &cfg);
        g.on_event(down(2, 200.0, 100.0, 10), &cfg);
        assert!(g.is_pinching());
        assert!(!g.is_dragging());
        let fx = g.on_event(mv(2, 300.0, 100.0), &cfg);
        assert_eq!(fx, GestureEffect::Zoom(2.0));
        // One finger lifts: the other doesn't start panning.
        assert_eq!(g.on_event(up(2, 300.0, 100.0, 60), &cfg), GestureEffect::None);
        assert!(!g.is_pinching());
        assert_eq!(g.on_event(mv(1, 160.0, 100.0), &cfg), GestureEffect::None);
        // Nor does it end as a tap.
        assert_eq!(g.on_event(up(1, 160.0, 100.0, 80), &cfg), GestureEffect::None);
        assert!(g.is_idle());
    }

    #[test]
    fn test_coincident_pinch_points_do_not_divide_by_zero() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        g.on_event(down(1, 50.0, 50.0, 0), &cfg);
        g.on_event(down(2, 50.0, 50.0, 0), &cfg);
        assert_eq!(g.on_event(mv(2, 80.0, 50.0), &cfg), GestureEffect::None);
        assert_eq!(g.on_event(mv(2, 110.0, 50.0), &cfg), GestureEffect::Zoom(2.0));
    }

    #[test]
    fn test_cancel_resets() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        g.on_event(down(3, 0.0, 0.0, 0), &cfg);
        g.on_event(PointerEvent::Cancel { id: 3 }, &cfg);
        assert!(g.is_idle());
        assert_eq!(g.on_event(up(3, 0.0, 0.0, 20), &cfg), GestureEffect::None);
    }

    #[test]
    fn test_wheel_steps() {
        let cfg = InteractionConfig::default();
        let mut g = GestureState::default();
        assert_eq!(g.on_event(PointerEvent::Wheel { delta: 3.0 }, &cfg), GestureEffect::Zoom(1.06));
        assert_eq!(g.on_event(PointerEvent::Wheel { delta: -1.0 }, &cfg), GestureEffect::Zoom(0.94));
        assert_eq!(g.on_event(PointerEvent::Wheel { delta: 0.0 }, &cfg), GestureEffect::None);
    }
}
