//! Toolbar rendering for `StarfieldApp`.
//!
//! Draws the "All" reset button, one pill per cluster (largest first),
//! the reshuffle button and the detail-panel toggle.

use egui::{Color32, RichText};

use super::StarfieldApp;

impl StarfieldApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        let mut focus: Option<String> = None;

        ui.horizontal_wrapped(|ui| {
            ui.add_space(4.0);

            if ui.button("All").clicked() {
                self.reset_view();
            }
            ui.separator();

            for cluster in &self.session.scene().clusters {
                let c = cluster.color;
                let text = RichText::new(format!("{}  {}", cluster.name, cluster.item_count))
                    .color(Color32::from_rgb(c.r, c.g, c.b));
                if ui
                    .add(egui::Button::new(text).rounding(10.0))
                    .on_hover_text(format!("{:.0}% of items", cluster.percentage))
                    .clicked()
                {
                    focus = Some(cluster.category_id.clone());
                }
            }

            ui.separator();
            if ui.button("Reshuffle").clicked() {
                self.reshuffle();
            }
            ui.toggle_value(&mut self.show_detail, "Details");
            ui.weak(format!("{} items · seed {}", self.items.len(), self.seed));
        });

        // Focus outside the loop: the pills borrow the scene.
        if let Some(id) = focus {
            self.focus_category(&id);
        }
    }
}
