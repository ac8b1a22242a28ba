//! Interaction Controller: pointer/touch stream → camera commands and
//! selections.
//!
//! Input is a single ordered stream of [`PointerEvent`]s. Mouse buttons
//! and touch points both arrive as pointers; the front-end maps its
//! platform events onto this type. Effects land on the camera *target*
//! only, so they become visible from the next easing step.

pub mod gesture;
pub mod hit_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::geom::{Point, Viewport};
use crate::layout::{Cluster, SceneGraph, Star};
use crate::model::Item;

pub use gesture::{GestureEffect, GestureState};
pub use hit_test::{hit_test, Hit};

pub type PointerId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { id: PointerId, pos: Point, at: Duration },
    Move { id: PointerId, pos: Point },
    Up { id: PointerId, pos: Point, at: Duration },
    /// The platform dropped the pointer (window lost focus, touch cancelled).
    Cancel { id: PointerId },
    /// Scroll wheel. Positive = scrolled up/away = zoom in.
    Wheel { delta: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Per-axis travel (screen px) before a press stops being a tap candidate.
    pub move_threshold: f32,
    pub tap_window_ms: u64,
    /// Star hit radius in screen px (divided by zoom in scene space).
    pub star_hit_radius: f32,
    pub cluster_hit_radius: f32,
    pub wheel_zoom_in: f32,
    pub wheel_zoom_out: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            move_threshold: 3.0,
            tap_window_ms: 300,
            star_hit_radius: 18.0,
            cluster_hit_radius: 90.0,
            wheel_zoom_in: 1.06,
            wheel_zoom_out: 0.94,
        }
    }
}

/// Receives confirmed selections (detail panel, logging, tests).
pub trait SelectionHandler {
    fn on_star_selected(&mut self, star: &Star, item: &Item);
    fn on_cluster_selected(&mut self, cluster: &Cluster, members: &[&Star]);
}

/// Discards selections.
impl SelectionHandler for () {
    fn on_star_selected(&mut self, _star: &Star, _item: &Item) {}
    fn on_cluster_selected(&mut self, _cluster: &Cluster, _members: &[&Star]) {}
}

pub struct InteractionController {
    config: InteractionConfig,
    gesture: GestureState,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            gesture: GestureState::default(),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Drop any in-flight gesture.
    pub fn reset(&mut self) {
        self.gesture.clear();
    }

    /// Feed one event. Pan/zoom go to the camera target; a tap is
    /// hit-tested against the camera's current view and, on a cluster
    /// hit, focuses that cluster. The hit (if any) is returned for the
    /// caller to dispatch.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        camera: &mut Camera,
        scene: &SceneGraph,
        viewport: Viewport,
    ) -> Option<Hit> {
        match self.gesture.on_event(event, &self.config) {
            GestureEffect::None => None,
            GestureEffect::Pan(delta) => {
                camera.pan_by(delta);
                None
            }
            GestureEffect::Zoom(factor) => {
                camera.zoom_by(factor);
                None
            }
            GestureEffect::Tap(pos) => {
                let hit = hit_test(scene, camera.current(), viewport, pos, &self.config);
                if let Some(Hit::Cluster(ci)) = hit {
                    camera.focus_on_cluster(&scene.clusters[ci]);
                }
                log::debug!("interaction: tap at ({:.0}, {:.0}) → {:?}", pos.x, pos.y, hit);
                hit
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;
    use crate::category::CategoryRegistry;
    use crate::layout::tests::item;
    use crate::layout::{LayoutConfig, LayoutEngine};

    const VP: Viewport = Viewport::new(1000.0, 800.0);

    fn scene() -> SceneGraph {
        let items = vec![item("1", "art", 3.0), item("2", "art", 1.0), item("3", "tech", 2.0)];
        LayoutEngine::new(LayoutConfig::default())
            .with_seed(21)
            .build(&items, &CategoryRegistry::default())
    }

    #[test]
    fn test_drag_moves_camera_target() {
        let scene = scene();
        let mut cam = Camera::new(CameraConfig::default());
        cam.snap_to(Point::ZERO, 2.0);
        let mut ctl = InteractionController::new(InteractionConfig::default());
        let at = Duration::ZERO;
        ctl.handle(PointerEvent::Down { id: 0, pos: Point::new(10.0, 10.0), at }, &mut cam, &scene, VP);
        ctl.handle(PointerEvent::Move { id: 0, pos: Point::new(30.0, 10.0) }, &mut cam, &scene, VP);
        assert_eq!(cam.target().pan, Point::new(10.0, 0.0));
        assert_eq!(cam.current().pan, Point::ZERO);
    }

    #[test]
    fn test_tap_on_cluster_focuses_it() {
        let mut scene = scene();
        for s in &mut scene.stars {
            s.position = Point::new(9000.0, 9000.0);
        }
        let mut cam = Camera::new(CameraConfig::default());
        let mut ctl = InteractionController::new(InteractionConfig::default());
        let pos = cam.current().world_to_screen(scene.clusters[1].center, VP);
        ctl.handle(PointerEvent::Down { id: 0, pos, at: Duration::ZERO }, &mut cam, &scene, VP);
        let hit = ctl.handle(
            PointerEvent::Up { id: 0, pos, at: Duration::from_millis(90) },
            &mut cam,
            &scene,
            VP,
        );
        assert_eq!(hit, Some(Hit::Cluster(1)));
        assert_eq!(cam.target().pan, scene.clusters[1].center * -1.0);
        assert_eq!(cam.target().zoom, 2.2);
    }

    #[test]
    fn test_wheel_respects_zoom_range() {
        let scene = SceneGraph::default();
        let mut cam = Camera::new(CameraConfig::default());
        let mut ctl = InteractionController::new(InteractionConfig::default());
        for _ in 0..200 {
            ctl.handle(PointerEvent::Wheel { delta: 1.0 }, &mut cam, &scene, VP);
        }
        assert_eq!(cam.target().zoom, 4.0);
        for _ in 0..200 {
            ctl.handle(PointerEvent::Wheel { delta: -1.0 }, &mut cam, &scene, VP);
        }
        assert_eq!(cam.target().zoom, 0.25);
    }
}
