//! Content-area rendering for `StarfieldApp`.
//!
//! - `draw_starfield`: canvas allocation, input forwarding, one render-loop frame
//! - `draw_detail_panel`: right-side selection details

use egui::{Color32, Event, PointerButton, Pos2, Rect, Sense, TouchPhase};

use alice_starfield::geom::{Point, Viewport};
use alice_starfield::render::{EguiCanvas, FrameOutcome};
use alice_starfield::PointerEvent;

use super::{Detail, StarfieldApp};

/// Touch ids are offset so they never collide with the mouse pointer (0).
const TOUCH_ID_BASE: u64 = 1;
const MOUSE_ID: u64 = 0;

impl StarfieldApp {
    // ── Star field ───────────────────────────────────────────────────────────

    pub fn draw_starfield(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.render_loop
            .observe_surface(Viewport::new(rect.width(), rect.height()), ctx.pixels_per_point());

        let (events, touching, scroll) = ctx.input(|i| (i.events.clone(), i.any_touches(), i.raw_scroll_delta.y));
        for event in &events {
            if let Some(pe) = self.map_event(event, rect, touching) {
                self.session.handle_pointer(pe, &mut self.panel);
            }
        }
        if response.hovered() && scroll != 0.0 {
            self.session
                .handle_pointer(PointerEvent::Wheel { delta: scroll }, &mut self.panel);
        }

        let mut canvas = EguiCanvas::new(&painter, rect);
        if let FrameOutcome::Drawn(stats) = self.render_loop.frame(self.ticket, &mut self.session, &mut canvas) {
            log::trace!(
                "frame: {} stars ({} culled), {} particles, {} edges",
                stats.stars_drawn,
                stats.stars_culled,
                stats.particles_drawn,
                stats.edges_drawn
            );
        }
    }

    /// Translate an egui event into a canvas-local pointer event.
    ///
    /// While touches are active egui also synthesizes mouse events for
    /// them; those are dropped so a finger is never seen twice.
    fn map_event(&self, event: &Event, rect: Rect, touching: bool) -> Option<PointerEvent> {
        let local = |p: Pos2| Point::new(p.x - rect.min.x, p.y - rect.min.y);
        let at = self.session.now();
        match *event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } if !touching => {
                if pressed {
                    rect.contains(pos).then(|| PointerEvent::Down {
                        id: MOUSE_ID,
                        pos: local(pos),
                        at,
                    })
                } else {
                    Some(PointerEvent::Up {
                        id: MOUSE_ID,
                        pos: local(pos),
                        at,
                    })
                }
            }
            Event::PointerMoved(pos) if !touching => Some(PointerEvent::Move {
                id: MOUSE_ID,
                pos: local(pos),
            }),
            Event::PointerGone if !touching => Some(PointerEvent::Cancel { id: MOUSE_ID }),
            Event::Touch { id, phase, pos: raw, .. } => {
                let id = TOUCH_ID_BASE + id.0;
                let pos = local(raw);
                match phase {
                    TouchPhase::Start => rect.contains(raw).then_some(PointerEvent::Down { id, pos, at }),
                    TouchPhase::Move => Some(PointerEvent::Move { id, pos }),
                    TouchPhase::End => Some(PointerEvent::Up { id, pos, at }),
                    TouchPhase::Cancel => Some(PointerEvent::Cancel { id }),
                }
            }
            _ => None,
        }
    }

    // ── Detail panel ─────────────────────────────────────────────────────────

    pub fn draw_detail_panel(&self, ui: &mut egui::Ui) {
        ui.heading("Details");
        ui.separator();

        match &self.panel.detail {
            Detail::Empty => {
                ui.weak("Tap a star or a cluster.");
            }
            Detail::Star {
                id,
                caption,
                category,
                tags,
                weight,
                posted,
                media_url,
            } => {
                ui.label(egui::RichText::new(caption).strong());
                ui.add_space(4.0);
                egui::Grid::new("star_detail").num_columns(2).show(ui, |ui| {
                    ui.weak("id");
                    ui.label(id);
                    ui.end_row();
                    ui.weak("category");
                    ui.label(self.registry.resolve(category).0);
                    ui.end_row();
                    ui.weak("weight");
                    ui.label(format!("{weight:.1}"));
                    ui.end_row();
                    ui.weak("posted");
                    ui.label(posted);
                    ui.end_row();
                });
                if !tags.is_empty() {
                    ui.add_space(4.0);
                    ui.label(tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join(" "));
                }
                if let Some(url) = media_url {
                    ui.hyperlink_to("media", url);
                }
            }
            Detail::Cluster {
                name,
                color,
                count,
                percentage,
                highlights,
            } => {
                ui.label(
                    egui::RichText::new(name)
                        .strong()
                        .color(Color32::from_rgb(color[0], color[1], color[2])),
                );
                ui.label(format!("{count} items · {percentage:.0}%"));
                ui.add_space(6.0);
                for caption in highlights {
                    ui.label(format!("• {caption}"));
                }
            }
        }

        ui.add_space(12.0);
        ui.separator();
        let view = self.session.camera().current();
        ui.weak(format!(
            "zoom {:.2} · pan ({:.0}, {:.0})",
            view.zoom, view.pan.x, view.pan.y
        ));
    }
}
