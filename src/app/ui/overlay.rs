//! The floating controls themselves: two circular buttons with a progress
//! ring, painted over everything else. What is visible, how faded, and what
//! a click means all come from the supervisor's state; this file only draws
//! and routes input.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Instant;

use egui::{Color32, Id, Order, Pos2, Rect, Sense, Stroke, Vec2, pos2};

use super::super::ScrollmateApp;
use crate::buttons::{BUTTON_DIAMETER, ButtonController, Direction, RING_CIRCUMFERENCE};

const RING_RADIUS: f32 = RING_CIRCUMFERENCE / TAU;
const ARC_SEGMENTS: usize = 48;

impl ScrollmateApp {
    pub(crate) fn ui_overlay(&mut self, ctx: &egui::Context, now: Instant) {
        let Some(controls) = self.supervisor.controls() else {
            return;
        };
        if !controls.buttons.is_rendered() {
            return;
        }
        let screen = ctx.screen_rect();
        let placements =
            ButtonController::placements(&self.settings, screen.width(), screen.height());
        let progress = controls.buttons.progress();

        let mut hovering = false;
        let mut clicked = None;
        egui::Area::new(Id::new("scroll_controls"))
            .order(Order::Foreground)
            .fixed_pos(Pos2::ZERO)
            .show(ctx, |ui| {
                let pairs = [
                    (Direction::Top, placements[0]),
                    (Direction::Bottom, placements[1]),
                ];
                for (direction, placement) in pairs {
                    let visual = *controls.buttons.visual(direction);
                    if visual.presence <= 0.0 {
                        continue;
                    }
                    let center = pos2(placement.x, placement.y);
                    let rect = Rect::from_center_size(center, Vec2::splat(BUTTON_DIAMETER));
                    let id = Id::new(("scroll_control", direction.label()));
                    let response = ui.interact(rect, id, Sense::click());
                    hovering |= response.hovered();
                    if response.clicked() {
                        clicked = Some(direction);
                    }

                    let opacity = visual.opacity();
                    let radius = BUTTON_DIAMETER / 2.0 * visual.scale();
                    let accent = if visual.auto_scrolling {
                        Color32::from_rgb(230, 140, 50)
                    } else if visual.near_edge {
                        Color32::from_gray(110)
                    } else {
                        Color32::from_rgb(70, 130, 220)
                    };
                    let painter = ui.painter();
                    painter.circle_filled(
                        center,
                        radius,
                        Color32::from_gray(30).gamma_multiply(opacity),
                    );
                    painter.circle_stroke(
                        center,
                        radius,
                        Stroke::new(1.0, accent.gamma_multiply(opacity)),
                    );

                    if self.settings.show_progress_ring {
                        let ring_radius = RING_RADIUS * visual.scale();
                        painter.circle_stroke(
                            center,
                            ring_radius,
                            Stroke::new(2.5, Color32::from_gray(70).gamma_multiply(opacity)),
                        );
                        stroke_arc(
                            painter,
                            center,
                            ring_radius,
                            progress,
                            Stroke::new(2.5, accent.gamma_multiply(opacity)),
                        );
                    }
                    draw_arrow(
                        painter,
                        center,
                        direction,
                        radius,
                        Color32::from_gray(230).gamma_multiply(opacity),
                    );

                    if let Some(text) = controls.buttons.tooltip(direction, &self.settings) {
                        response.on_hover_text(text);
                    }
                }
            });

        self.supervisor.notify_hover(hovering, now, &self.settings);
        if let Some(direction) = clicked {
            self.supervisor
                .handle_click(direction, &mut self.page, now, &self.settings);
        }
    }
}

/// Arc from twelve o'clock, clockwise, covering `fraction` of the circle.
fn stroke_arc(painter: &egui::Painter, center: Pos2, radius: f32, fraction: f32, stroke: Stroke) {
    let sweep = fraction.clamp(0.0, 1.0) * TAU;
    if sweep <= 0.0 {
        return;
    }
    let start = -FRAC_PI_2;
    let points: Vec<Pos2> = (0..=ARC_SEGMENTS)
        .map(|i| {
            let angle = start + sweep * i as f32 / ARC_SEGMENTS as f32;
            pos2(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect();
    painter.add(egui::Shape::line(points, stroke));
}

fn draw_arrow(
    painter: &egui::Painter,
    center: Pos2,
    direction: Direction,
    radius: f32,
    color: Color32,
) {
    let span = radius * 0.42;
    let heading = match direction {
        Direction::Top => -1.0,
        Direction::Bottom => 1.0,
    };
    let stroke = Stroke::new(2.0, color);
    let tip = pos2(center.x, center.y + heading * span);
    painter.line_segment([pos2(center.x, center.y - heading * span), tip], stroke);
    painter.line_segment(
        [tip, pos2(center.x - span * 0.8, tip.y - heading * span * 0.8)],
        stroke,
    );
    painter.line_segment(
        [tip, pos2(center.x + span * 0.8, tip.y - heading * span * 0.8)],
        stroke,
    );
}
