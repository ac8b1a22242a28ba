//! Render Loop: layered drawing of a scene session.
//!
//! Pipeline per frame:
//!   1. `frame_loop`: ticket check, surface check, dt, camera step
//!   2. `frame`: background → (camera transform) nebulae → specks → edges
//!      → stars → labels → (screen space) vignette
//!   3. a [`Canvas`] backend turns draw calls into pixels
//!      (`egui_canvas` on desktop; a recorder in tests)
//!
//! The frame code never touches egui directly, so ordering and culling are
//! testable without a window.

pub mod egui_canvas;
pub mod frame;
pub mod frame_loop;

use serde::{Deserialize, Serialize};

use crate::camera::View;
use crate::color::{Rgb, Rgba};
use crate::geom::{Point, Viewport};

pub use egui_canvas::EguiCanvas;
pub use frame::{draw_frame, FrameStats};
pub use frame_loop::{FrameOutcome, FrameTicket, RenderLoop};

/// Scene → screen mapping installed while scene-space layers are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub view: View,
    pub viewport: Viewport,
}

impl ViewTransform {
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        self.view.world_to_screen(p, self.viewport)
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.view.zoom
    }
}

/// Immediate-mode drawing surface.
///
/// Positions and lengths are in scene units while a transform is set and in
/// screen pixels otherwise. Implementations apply the transform themselves.
pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn set_transform(&mut self, transform: Option<ViewTransform>);
    /// Concentric fill: `stops` are `(offset in 0..=1, color)` from center out.
    fn radial_gradient(&mut self, center: Point, radius: f32, stops: &[(f32, Rgba)]);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Rgba);
    fn line(&mut self, a: Point, b: Point, width: f32, color: Rgba);
    /// Centered text.
    fn text(&mut self, pos: Point, size: f32, text: &str, color: Rgba);
}

/// A fixed background glow, in fractions of the viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundGlow {
    pub x: f32,
    pub y: f32,
    /// Fraction of the viewport's larger side.
    pub radius: f32,
    pub color: Rgb,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub background: Rgb,
    pub glows: Vec<BackgroundGlow>,
    pub vignette: Rgb,
    pub vignette_alpha: f32,
    pub nebula_alpha: f32,
    pub bridge_alpha: f32,
    pub edge_alpha: f32,
    pub edge_width: f32,
    /// Halo and glow radii as multiples of the star radius.
    pub halo_scale: f32,
    pub glow_scale: f32,
    /// Stars at least this large get diffraction spikes.
    pub spike_min_radius: f32,
    pub spike_length: f32,
    /// Label font size in scene units at zoom 1.
    pub label_size: f32,
    /// Screen-pixel margin kept around the viewport before culling.
    pub cull_margin: f32,
    /// Upper bound on per-frame dt, seconds.
    pub max_frame_dt: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Rgb::new(5, 6, 16),
            glows: vec![
                BackgroundGlow {
                    x: 0.3,
                    y: 0.35,
                    radius: 0.7,
                    color: Rgb::new(60, 30, 110),
                    alpha: 0.22,
                },
                BackgroundGlow {
                    x: 0.75,
                    y: 0.7,
                    radius: 0.6,
                    color: Rgb::new(20, 60, 120),
                    alpha: 0.18,
                },
            ],
            vignette: Rgb::BLACK,
            vignette_alpha: 0.7,
            nebula_alpha: 0.16,
            bridge_alpha: 0.08,
            edge_alpha: 0.14,
            edge_width: 0.6,
            halo_scale: 6.0,
            glow_scale: 2.5,
            spike_min_radius: 6.5,
            spike_length: 5.0,
            label_size: 13.0,
            cull_margin: 24.0,
            max_frame_dt: 0.1,
        }
    }
}
