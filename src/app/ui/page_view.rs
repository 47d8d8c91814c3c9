//! The simulated page: a scrollable content area kept in two-way sync with
//! the model. Engine-driven moves are pushed into the widget; user scrolling
//! is written back and reported as scroll activity.

use std::time::Instant;

use egui::{Color32, Rect, pos2, vec2};

use super::super::{CHAT_MESSAGE_HEIGHT, Scenario, ScrollmateApp};
use crate::page::{ScrollBehavior, ScrollTarget};

const CHAT_HEADER_HEIGHT: f32 = 48.0;
const SYNC_EPS: f32 = 0.5;

impl ScrollmateApp {
    pub(crate) fn ui_page_view(&mut self, ui: &mut egui::Ui, now: Instant) {
        self.sync_layout(ui.available_size());

        if self.scenario == Scenario::Chat {
            ui.label(egui::RichText::new("# support-chat").strong());
            ui.separator();
            if self.pane.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Conversation pane removed.");
                });
                return;
            }
        }

        let target = self.view_target();
        let model_offset = self.page.scroll_top(target);
        let mut area = egui::ScrollArea::vertical()
            .id_salt("page_view")
            .auto_shrink([false, false]);
        if (model_offset - self.view_offset).abs() > SYNC_EPS {
            // The engine moved the page; push the new offset into the view.
            area = area.vertical_scroll_offset(model_offset);
        }
        let output = area.show(ui, |ui| self.draw_page_content(ui));
        let shown = output.state.offset.y;
        if (shown - self.page.scroll_top(target)).abs() > SYNC_EPS {
            // The user dragged or wheel-scrolled the view.
            self.page.scroll_to(target, shown, ScrollBehavior::Instant);
            self.supervisor.notify_scroll(&self.page, now);
        }
        self.view_offset = self.page.scroll_top(target);
    }

    /// Mirror the panel size into the model's viewport and pane geometry.
    fn sync_layout(&mut self, avail: egui::Vec2) {
        if (avail - self.view_size).length() <= 0.5 {
            return;
        }
        let resized = self.view_size != egui::Vec2::ZERO;
        self.view_size = avail;
        self.page.set_viewport_height(avail.y);
        if self.scenario == Scenario::Chat {
            self.page.set_viewport_content_height(avail.y);
            let pane_height = (avail.y - CHAT_HEADER_HEIGHT).max(0.0);
            if let Some(pane) = self.pane
                && let Some(node) = self.page.element_mut(pane)
            {
                node.height = pane_height;
            }
        }
        if resized {
            self.supervisor.notify_resize(&self.page);
        }
    }

    fn draw_page_content(&self, ui: &mut egui::Ui) {
        let extent = match self.view_target() {
            ScrollTarget::Viewport => self.page.viewport().content_height,
            ScrollTarget::Element(id) => self.page.element(id).map_or(0.0, |n| n.content_height),
        };
        let width = ui.available_width();
        let (rect, _response) =
            ui.allocate_exact_size(vec2(width, extent), egui::Sense::hover());
        let painter = ui.painter_at(rect.intersect(ui.clip_rect()));
        match self.scenario {
            Scenario::Chat => draw_chat(&painter, rect, self.chat_messages),
            Scenario::Article | Scenario::Static => draw_prose(&painter, rect),
        }
    }
}

fn draw_chat(painter: &egui::Painter, rect: Rect, messages: usize) {
    let clip = painter.clip_rect();
    for i in 0..messages {
        let top = rect.top() + i as f32 * CHAT_MESSAGE_HEIGHT;
        if top + CHAT_MESSAGE_HEIGHT < clip.top() || top > clip.bottom() {
            continue;
        }
        let incoming = i % 3 != 2;
        let bubble_width = rect.width() * 0.55;
        let bubble_left = if incoming {
            rect.left() + 12.0
        } else {
            rect.right() - bubble_width - 12.0
        };
        let bubble = Rect::from_min_size(
            pos2(bubble_left, top + 8.0),
            vec2(bubble_width, CHAT_MESSAGE_HEIGHT - 20.0),
        );
        let fill = if incoming {
            Color32::from_gray(45)
        } else {
            Color32::from_rgb(35, 60, 90)
        };
        painter.rect_filled(bubble, 8, fill);
        painter.text(
            pos2(bubble.left() + 10.0, bubble.center().y),
            egui::Align2::LEFT_CENTER,
            format!("message {}", i + 1),
            egui::FontId::proportional(13.0),
            Color32::from_gray(200),
        );
    }
}

fn draw_prose(painter: &egui::Painter, rect: Rect) {
    const LINE_HEIGHT: f32 = 24.0;
    let clip = painter.clip_rect();
    let lines = (rect.height() / LINE_HEIGHT).ceil() as usize;
    for i in 0..lines {
        let top = rect.top() + i as f32 * LINE_HEIGHT;
        if top + LINE_HEIGHT < clip.top() || top > clip.bottom() {
            continue;
        }
        // Ragged line lengths so the filler reads as paragraphs.
        let fraction = match i % 7 {
            0 => 0.88,
            6 => 0.45,
            n => 0.68 + (n % 3) as f32 * 0.07,
        };
        let line = Rect::from_min_size(
            pos2(rect.left() + 16.0, top + 7.0),
            vec2((rect.width() - 32.0).max(0.0) * fraction, 10.0),
        );
        painter.rect_filled(line, 4, Color32::from_gray(60));
    }
}
