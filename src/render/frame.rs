//! One frame of the star field.
//!
//! Back-to-front:
//!   screen  background fill, two fixed glows
//!   scene   nebula cores/wisps, bridges
//!   scene   stream and dust specks (independent sinusoidal twinkle)
//!   scene   constellation edges
//!   scene   stars: halo → glow → core (+ spikes, + selection ring)
//!   scene   cluster labels (font ∝ 1/zoom)
//!   screen  vignette
//!
//! Everything whose screen bounds miss the viewport is skipped.

use std::f32::consts::FRAC_PI_2;

use super::{Canvas, RenderConfig, ViewTransform};
use crate::camera::View;
use crate::color::{lerp_color, Rgb, Rgba};
use crate::geom::{Point, Viewport};
use crate::layout::{Nebula, SceneGraph, Speck, Star};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub stars_drawn: usize,
    pub stars_culled: usize,
    pub particles_drawn: usize,
    pub edges_drawn: usize,
}

/// `[0, 1]` sinusoid of time, per-element phase and speed.
#[inline]
fn pulse(time: f32, speed: f32, phase: f32) -> f32 {
    0.5 + 0.5 * (time * speed + phase).sin()
}

struct Culler {
    transform: ViewTransform,
    margin: f32,
}

impl Culler {
    fn visible(&self, center: Point, radius: f32) -> bool {
        let screen = self.transform.apply(center);
        self.transform
            .viewport
            .contains(screen, radius * self.transform.scale() + self.margin)
    }
}

pub fn draw_frame(
    canvas: &mut dyn Canvas,
    scene: &SceneGraph,
    view: View,
    viewport: Viewport,
    time: f32,
    selected: Option<usize>,
    cfg: &RenderConfig,
) -> FrameStats {
    let mut stats = FrameStats::default();

    canvas.set_transform(None);
    canvas.clear(cfg.background);
    let extent = viewport.width.max(viewport.height);
    for glow in &cfg.glows {
        canvas.radial_gradient(
            Point::new(glow.x * viewport.width, glow.y * viewport.height),
            glow.radius * extent,
            &[(0.0, glow.color.alpha(glow.alpha)), (1.0, glow.color.alpha(0.0))],
        );
    }

    let transform = ViewTransform { view, viewport };
    let cull = Culler {
        transform,
        margin: cfg.cull_margin,
    };
    canvas.set_transform(Some(transform));

    for n in &scene.nebulae {
        draw_nebula(canvas, &cull, n, cfg.nebula_alpha, time);
    }
    for n in &scene.bridges {
        draw_nebula(canvas, &cull, n, cfg.bridge_alpha, time);
    }

    for s in scene.streams.iter().chain(&scene.dust) {
        if draw_speck(canvas, &cull, s, time) {
            stats.particles_drawn += 1;
        }
    }

    for e in &scene.edges {
        let (a, b) = (&scene.stars[e.a], &scene.stars[e.b]);
        let mid = a.position.lerp(b.position, 0.5);
        let half = a.position.distance(b.position) * 0.5;
        if !cull.visible(mid, half) {
            continue;
        }
        let color = scene.clusters[e.cluster].color;
        let alpha = cfg.edge_alpha * (0.6 + 0.4 * pulse(time, 0.8, e.a as f32));
        canvas.line(a.position, b.position, cfg.edge_width, color.alpha(alpha));
        stats.edges_drawn += 1;
    }

    for (i, star) in scene.stars.iter().enumerate() {
        if !cull.visible(star.position, star.radius * cfg.halo_scale) {
            stats.stars_culled += 1;
            continue;
        }
        let color = scene.clusters[star.cluster].color;
        draw_star(canvas, star, color, time, cfg);
        if selected == Some(i) {
            let ring = star.radius * 3.0 + 2.0 * pulse(time, 3.0, 0.0);
            canvas.stroke_circle(star.position, ring, 1.2 / view.zoom, Rgb::WHITE.alpha(0.8));
        }
        stats.stars_drawn += 1;
    }

    let font = cfg.label_size / view.zoom;
    for c in &scene.clusters {
        if !cull.visible(c.center, font * 6.0) {
            continue;
        }
        let name_at = c.center - Point::new(0.0, font * 0.7);
        let count_at = c.center + Point::new(0.0, font * 0.7);
        canvas.text(name_at, font, &c.name, c.color.alpha(0.9));
        canvas.text(
            count_at,
            font * 0.8,
            &format!("{} · {:.0}%", c.item_count, c.percentage),
            Rgb::WHITE.alpha(0.55),
        );
    }

    canvas.set_transform(None);
    let radius = viewport.center().length();
    canvas.radial_gradient(
        viewport.center(),
        radius,
        &[
            (0.0, Rgba::TRANSPARENT),
            (0.6, cfg.vignette.alpha(0.0)),
            (1.0, cfg.vignette.alpha(cfg.vignette_alpha)),
        ],
    );

    stats
}

fn draw_nebula(canvas: &mut dyn Canvas, cull: &Culler, n: &Nebula, alpha: f32, time: f32) {
    if !cull.visible(n.position, n.radius) {
        return;
    }
    let a = alpha * (0.75 + 0.25 * pulse(time, n.speed, n.phase));
    canvas.radial_gradient(
        n.position,
        n.radius,
        &[
            (0.0, n.color.alpha(a)),
            (0.5, n.color.alpha(a * 0.4)),
            (1.0, n.color.alpha(0.0)),
        ],
    );
}

fn draw_speck(canvas: &mut dyn Canvas, cull: &Culler, s: &Speck, time: f32) -> bool {
    if !cull.visible(s.position, s.size) {
        return false;
    }
    let a = 0.15 + 0.75 * pulse(time, s.speed, s.phase);
    canvas.fill_circle(s.position, s.size, s.color.alpha(a));
    true
}

fn draw_star(canvas: &mut dyn Canvas, star: &Star, color: Rgb, time: f32, cfg: &RenderConfig) {
    let twinkle = 0.7 + 0.3 * pulse(time, star.twinkle_speed, star.twinkle_phase);
    let r = star.radius;
    let p = star.position;

    canvas.radial_gradient(
        p,
        r * cfg.halo_scale,
        &[(0.0, color.alpha(0.18 * twinkle)), (1.0, color.alpha(0.0))],
    );
    canvas.radial_gradient(
        p,
        r * cfg.glow_scale,
        &[(0.0, color.alpha(0.55 * twinkle)), (1.0, color.alpha(0.0))],
    );
    let hot = lerp_color(color, Rgb::WHITE, 0.75);
    canvas.radial_gradient(
        p,
        r,
        &[
            (0.0, Rgb::WHITE.alpha(twinkle)),
            (0.6, hot.alpha(0.9 * twinkle)),
            (1.0, color.alpha(0.0)),
        ],
    );

    if star.is_brightest || r >= cfg.spike_min_radius {
        let len = r * cfg.spike_length;
        let spike = hot.alpha(0.45 * twinkle);
        let width = (r * 0.12).max(0.4);
        for angle in [star.spike_angle, star.spike_angle + FRAC_PI_2] {
            let d = Point::polar(angle, len);
            canvas.line(p - d, p + d, width, spike);
        }
    }
}
