//! egui Painter backend.
//!
//! Radial gradients are triangle-fan meshes: one center vertex plus one
//! ring of vertices per color stop, so egui interpolates the colors between
//! rings on the GPU.

use egui::epaint::Vertex;
use egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke};

use super::{Canvas, ViewTransform};
use crate::color::{Rgb, Rgba};
use crate::geom::Point;

/// Below this on-screen radius a gradient is drawn as a flat dot.
const MIN_GRADIENT_PX: f32 = 0.75;

pub struct EguiCanvas<'a> {
    painter: &'a Painter,
    rect: Rect,
    transform: Option<ViewTransform>,
}

impl<'a> EguiCanvas<'a> {
    /// Draw into `rect` (its top-left is screen-space origin).
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self {
            painter,
            rect,
            transform: None,
        }
    }

    fn pos(&self, p: Point) -> Pos2 {
        let p = match &self.transform {
            Some(t) => t.apply(p),
            None => p,
        };
        Pos2::new(self.rect.min.x + p.x, self.rect.min.y + p.y)
    }

    fn len(&self, v: f32) -> f32 {
        match &self.transform {
            Some(t) => v * t.scale(),
            None => v,
        }
    }
}

#[inline]
fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Segment count grows with on-screen size; tiny blobs stay cheap.
fn segments_for(radius_px: f32) -> u32 {
    (radius_px * 0.5).clamp(12.0, 64.0) as u32
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self, color: Rgb) {
        self.painter
            .rect_filled(self.rect, 0.0, Color32::from_rgb(color.r, color.g, color.b));
    }

    fn set_transform(&mut self, transform: Option<ViewTransform>) {
        self.transform = transform;
    }

    fn radial_gradient(&mut self, center: Point, radius: f32, stops: &[(f32, Rgba)]) {
        let Some(&(_, inner)) = stops.first() else {
            return;
        };
        let c = self.pos(center);
        let r = self.len(radius);
        if !(r.is_finite() && r > 0.0) {
            return;
        }
        if r < MIN_GRADIENT_PX {
            self.painter.circle_filled(c, r.max(0.5), color32(inner));
            return;
        }

        let n = segments_for(r);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(c, color32(inner));
        let rings: Vec<&(f32, Rgba)> = stops.iter().filter(|(t, _)| *t > 0.0).collect();
        for (k, &&(t, color)) in rings.iter().enumerate() {
            let ring_r = r * t.min(1.0);
            let base = mesh.vertices.len() as u32;
            for s in 0..n {
                let a = s as f32 / n as f32 * std::f32::consts::TAU;
                mesh.vertices.push(Vertex {
                    pos: Pos2::new(c.x + ring_r * a.cos(), c.y + ring_r * a.sin()),
                    uv: egui::epaint::WHITE_UV,
                    color: color32(color),
                });
            }
            for s in 0..n {
                let next = (s + 1) % n;
                if k == 0 {
                    mesh.add_triangle(0, base + s, base + next);
                } else {
                    let prev = base - n;
                    mesh.add_triangle(prev + s, base + s, base + next);
                    mesh.add_triangle(prev + s, base + next, prev + next);
                }
            }
        }
        self.painter.add(Shape::mesh(mesh));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.painter
            .circle_filled(self.pos(center), self.len(radius).max(0.5), color32(color));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Rgba) {
        self.painter.circle_stroke(
            self.pos(center),
            self.len(radius),
            Stroke::new(self.len(width), color32(color)),
        );
    }

    fn line(&mut self, a: Point, b: Point, width: f32, color: Rgba) {
        self.painter.line_segment(
            [self.pos(a), self.pos(b)],
            Stroke::new(self.len(width).max(0.5), color32(color)),
        );
    }

    fn text(&mut self, pos: Point, size: f32, text: &str, color: Rgba) {
        let px = self.len(size);
        if px < 4.0 {
            return;
        }
        self.painter.text(
            self.pos(pos),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(px),
            color32(color),
        );
    }
}
