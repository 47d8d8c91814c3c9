//! Settings side panel. Edits go into a draft and are committed through the
//! `updateSettings` message path, so the panel exercises the same code as an
//! external settings page.

use super::super::ScrollmateApp;
use crate::config::{ButtonPosition, ScrollUnit, Settings};

impl ScrollmateApp {
    pub(crate) fn ui_settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.add_space(4.0);

        ui.checkbox(&mut self.draft.show_top_button, "Show top button");
        ui.checkbox(&mut self.draft.show_bottom_button, "Show bottom button");
        ui.checkbox(&mut self.draft.show_progress_ring, "Progress ring");
        ui.checkbox(&mut self.draft.show_tooltips, "Tooltips");
        ui.checkbox(&mut self.draft.smooth_scrolling, "Smooth scrolling");
        ui.checkbox(&mut self.draft.shortcuts_enabled, "Keyboard shortcuts");

        ui.separator();
        egui::ComboBox::from_label("Position")
            .selected_text(position_label(self.draft.position))
            .show_ui(ui, |ui| {
                for position in [
                    ButtonPosition::MiddleRight,
                    ButtonPosition::TopRight,
                    ButtonPosition::BottomRight,
                ] {
                    ui.selectable_value(
                        &mut self.draft.position,
                        position,
                        position_label(position),
                    );
                }
            });

        ui.separator();
        ui.checkbox(
            &mut self.draft.custom_scroll_enabled,
            "Custom scroll destinations",
        );
        ui.add_enabled_ui(self.draft.custom_scroll_enabled, |ui| {
            egui::ComboBox::from_label("Unit")
                .selected_text(unit_label(self.draft.scroll_position_unit))
                .show_ui(ui, |ui| {
                    for unit in [ScrollUnit::Percentage, ScrollUnit::Pixels] {
                        ui.selectable_value(
                            &mut self.draft.scroll_position_unit,
                            unit,
                            unit_label(unit),
                        );
                    }
                });
            let range = match self.draft.scroll_position_unit {
                ScrollUnit::Percentage => 0.0..=100.0,
                ScrollUnit::Pixels => 0.0..=10_000.0,
            };
            ui.add(
                egui::Slider::new(&mut self.draft.top_scroll_position, range.clone())
                    .text("Top destination"),
            );
            ui.add(
                egui::Slider::new(&mut self.draft.bottom_scroll_position, range)
                    .text("Bottom destination"),
            );
        });

        ui.separator();
        ui.checkbox(&mut self.draft.auto_hide, "Auto-hide when idle");
        ui.add_enabled_ui(self.draft.auto_hide, |ui| {
            ui.add(
                egui::Slider::new(&mut self.draft.hide_delay_seconds, 0.5..=30.0)
                    .text("Hide delay (s)"),
            );
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                self.apply_draft();
            }
            if ui.button("Defaults").clicked() {
                self.draft = Settings::default();
            }
        });
        if let Some(ack) = &self.last_ack {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(format!("last ack: {ack}")).weak().small());
        }
    }
}

const fn position_label(position: ButtonPosition) -> &'static str {
    match position {
        ButtonPosition::MiddleRight => "Middle right",
        ButtonPosition::TopRight => "Top right",
        ButtonPosition::BottomRight => "Bottom right",
    }
}

const fn unit_label(unit: ScrollUnit) -> &'static str {
    match unit {
        ScrollUnit::Percentage => "Percent",
        ScrollUnit::Pixels => "Pixels",
    }
}
