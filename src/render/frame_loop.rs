//! Frame scheduling state.
//!
//! The host (eframe) calls `frame` once per display refresh. Each dataset
//! gets a fresh [`FrameTicket`]; starting a new one or cancelling
//! invalidates every older ticket, so a frame still queued for a replaced
//! scene draws nothing.

use std::time::Duration;

use super::frame::{draw_frame, FrameStats};
use super::{Canvas, RenderConfig};
use crate::geom::Viewport;
use crate::session::SceneSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Drawn(FrameStats),
    /// Zero-sized surface; retried next frame.
    SkippedEmptySurface,
    /// Ticket belongs to a cancelled or replaced loop.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Surface {
    viewport: Viewport,
    pixels_per_point: f32,
}

pub struct RenderLoop {
    config: RenderConfig,
    generation: u64,
    running: bool,
    last_frame: Option<Duration>,
    surface: Option<Surface>,
    frames: u64,
}

impl RenderLoop {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            generation: 0,
            running: false,
            last_frame: None,
            surface: None,
            frames: 0,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Start (or restart) for a new scene. Older tickets stop drawing.
    pub fn start(&mut self) -> FrameTicket {
        self.generation += 1;
        self.running = true;
        self.last_frame = None;
        self.frames = 0;
        log::debug!("render loop: start generation {}", self.generation);
        FrameTicket(self.generation)
    }

    pub fn cancel(&mut self) {
        if self.running {
            log::debug!("render loop: cancel generation {} after {} frames", self.generation, self.frames);
        }
        self.running = false;
    }

    pub fn is_current(&self, ticket: FrameTicket) -> bool {
        self.running && ticket.0 == self.generation
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Record the surface size and density. Returns true on change.
    pub fn observe_surface(&mut self, viewport: Viewport, pixels_per_point: f32) -> bool {
        let next = Surface {
            viewport,
            pixels_per_point,
        };
        if self.surface == Some(next) {
            return false;
        }
        log::debug!(
            "render loop: surface {:.0}×{:.0} @ {:.2}x",
            viewport.width,
            viewport.height,
            pixels_per_point
        );
        self.surface = Some(next);
        true
    }

    /// Seconds since the previous frame, clamped.
    fn delta(&mut self, now: Duration) -> f32 {
        let dt = match self.last_frame {
            Some(prev) => now.saturating_sub(prev).as_secs_f32(),
            None => 1.0 / 60.0,
        };
        self.last_frame = Some(now);
        dt.min(self.config.max_frame_dt)
    }

    pub fn frame(&mut self, ticket: FrameTicket, session: &mut SceneSession, canvas: &mut dyn Canvas) -> FrameOutcome {
        if !self.is_current(ticket) {
            return FrameOutcome::Cancelled;
        }
        let now = session.now();
        let dt = self.delta(now);

        // Skipped frames leave the camera and intro timer where they are.
        let viewport = match self.surface {
            Some(s) if !s.viewport.is_degenerate() => s.viewport,
            _ => {
                log::trace!("render loop: surface unavailable, skipping frame");
                return FrameOutcome::SkippedEmptySurface;
            }
        };
        session.set_viewport(viewport);
        session.advance(dt);

        let selected = session.selected_star().map(|s| s.item);
        let stats = draw_frame(
            canvas,
            session.scene(),
            session.camera().current(),
            viewport,
            now.as_secs_f32(),
            selected,
            &self.config,
        );
        self.frames += 1;
        FrameOutcome::Drawn(stats)
    }
}
