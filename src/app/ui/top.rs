//! Toolbar and status bar.

use std::time::Instant;

use super::super::{Scenario, ScrollmateApp};
use crate::buttons::Direction;
use crate::metrics;

impl ScrollmateApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Scrollmate").strong());
            ui.separator();
            for scenario in Scenario::ALL {
                if ui
                    .selectable_label(self.scenario == scenario, scenario.label())
                    .clicked()
                {
                    self.switch_scenario(scenario);
                }
            }
            ui.separator();
            if ui.button("Append content").clicked() {
                self.append_content(now);
            }
            if self.pane.is_some() && ui.button("Remove pane").clicked() {
                self.remove_pane(now);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.selectable_label(self.settings_open, "Settings").clicked() {
                    self.settings_open = !self.settings_open;
                    if self.settings_open {
                        self.draft = self.settings.clone();
                    }
                }
            });
        });
    }

    pub(crate) fn ui_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.page.url().to_string());
            ui.separator();
            ui.label(format!("controls: {}", self.supervisor.status_line()));
            if let Some(controls) = self.supervisor.controls() {
                ui.separator();
                let info = metrics::read(&self.page, controls.target);
                ui.label(format!(
                    "offset {:.0} / {:.0} ({:.0}%)",
                    info.offset,
                    info.max_scroll,
                    info.progress() * 100.0
                ));
                if let Some(session) = controls.machine.session() {
                    ui.separator();
                    let heading = match session.direction {
                        Direction::Top => "up",
                        Direction::Bottom => "down",
                    };
                    ui.label(format!(
                        "auto-scrolling {heading} at {:.1} px/frame",
                        session.speed
                    ));
                }
            }
            if let Some(status) = self.status.clone() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(status).weak());
                });
            }
        });
    }
}
