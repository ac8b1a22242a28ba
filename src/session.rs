//! One live scene: the scene graph plus the camera, gesture and intro
//! state that belong to it.
//!
//! Nothing here is global. Two sessions never share state, and dropping a
//! session (or calling `teardown`) cancels its pending intro timer.

use std::time::Duration;

use crate::camera::{Camera, CameraConfig};
use crate::clock::{Clock, OneShotTimer};
use crate::geom::Viewport;
use crate::interaction::{Hit, InteractionConfig, InteractionController, PointerEvent, SelectionHandler};
use crate::layout::{SceneGraph, Star};

pub struct SceneSession {
    scene: SceneGraph,
    camera: Camera,
    interaction: InteractionController,
    clock: Box<dyn Clock>,
    intro: OneShotTimer,
    selected: Option<usize>,
    viewport: Viewport,
}

impl SceneSession {
    /// Start a session. With a brightest star, the camera snaps to a
    /// close-up of it and the intro timer is armed to zoom out.
    pub fn new(
        scene: SceneGraph,
        camera: CameraConfig,
        interaction: InteractionConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut camera = Camera::new(camera);
        let mut intro = OneShotTimer::default();
        if let Some(star) = scene.brightest_star() {
            let zoom = camera.config().intro_zoom;
            camera.snap_to_point(star.position, zoom);
            intro.schedule(clock.now() + Duration::from_millis(camera.config().intro_delay_ms));
        }
        log::debug!(
            "session: start with {} stars in {} clusters",
            scene.stars.len(),
            scene.clusters.len()
        );
        Self {
            scene,
            camera,
            interaction: InteractionController::new(interaction),
            clock,
            intro,
            selected: None,
            viewport: Viewport::default(),
        }
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    /// Time on the session clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn intro_pending(&self) -> bool {
        self.intro.is_pending()
    }

    pub fn selected_star(&self) -> Option<&Star> {
        self.selected.and_then(|i| self.scene.stars.get(i))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Surface size used for hit-testing. Does not touch the scene graph.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// One frame: fire the intro if due, then ease the camera.
    /// Returns true while the camera is still moving.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.intro.poll(self.clock.now()) {
            log::info!("session: intro reveal");
            self.camera.reset();
        }
        self.camera.step(dt)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, handler: &mut dyn SelectionHandler) {
        let hit = self
            .interaction
            .handle(event, &mut self.camera, &self.scene, self.viewport);
        match hit {
            Some(Hit::Star(i)) => {
                self.selected = Some(i);
                let star = &self.scene.stars[i];
                log::debug!("session: star {} selected ({})", i, self.scene.item_of(star).id);
                handler.on_star_selected(star, self.scene.item_of(star));
            }
            Some(Hit::Cluster(ci)) => {
                self.selected = None;
                self.notify_cluster(ci, handler);
            }
            None => {}
        }
    }

    /// Focus the cluster for `category_id`. Unknown ids are ignored.
    pub fn focus_on_cluster(&mut self, category_id: &str, handler: &mut dyn SelectionHandler) -> bool {
        let Some(ci) = self.scene.cluster_index(category_id) else {
            log::debug!("session: no cluster for '{}'", category_id);
            return false;
        };
        self.selected = None;
        self.camera.focus_on_cluster(&self.scene.clusters[ci]);
        self.notify_cluster(ci, handler);
        true
    }

    fn notify_cluster(&self, ci: usize, handler: &mut dyn SelectionHandler) {
        let cluster = &self.scene.clusters[ci];
        let members: Vec<&Star> = cluster.stars.iter().map(|&i| &self.scene.stars[i]).collect();
        log::debug!("session: cluster '{}' selected, {} stars", cluster.category_id, members.len());
        handler.on_cluster_selected(cluster, &members);
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.camera.reset();
    }

    /// Cancel pending timers and in-flight gestures.
    pub fn teardown(&mut self) {
        if self.intro.is_pending() {
            log::debug!("session: teardown cancels pending intro");
        }
        self.intro.cancel();
        self.interaction.reset();
    }
}

impl Drop for SceneSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
