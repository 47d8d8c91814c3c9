use super::*;

fn info(offset: f32, extent: f32, visible: f32) -> ScrollInfo {
    ScrollInfo {
        offset,
        extent,
        visible,
        max_scroll: (extent - visible).max(0.0),
    }
}

fn synced(controller: &mut ButtonController, info: ScrollInfo, settings: &Settings) {
    controller.request_sync(info);
    assert!(controller.apply_pending(settings));
}

#[test]
fn top_threshold_boundary_is_strict() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    synced(&mut controller, info(100.0, 2000.0, 600.0), &settings);
    assert!(!controller.visual(Direction::Top).show);
    synced(&mut controller, info(101.0, 2000.0, 600.0), &settings);
    assert!(controller.visual(Direction::Top).show);
}

#[test]
fn bottom_shows_only_beyond_fifty_from_end() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    // 2000 - (1350 + 600) = 50: exactly at the threshold, hidden.
    synced(&mut controller, info(1350.0, 2000.0, 600.0), &settings);
    assert!(!controller.visual(Direction::Bottom).show);
    synced(&mut controller, info(1349.0, 2000.0, 600.0), &settings);
    assert!(controller.visual(Direction::Bottom).show);
}

#[test]
fn near_edge_uses_ten_pixel_band() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    synced(&mut controller, info(5.0, 2000.0, 600.0), &settings);
    assert!(controller.visual(Direction::Top).near_edge);
    assert!(!controller.visual(Direction::Bottom).near_edge);
    synced(&mut controller, info(1395.0, 2000.0, 600.0), &settings);
    assert!(!controller.visual(Direction::Top).near_edge);
    assert!(controller.visual(Direction::Bottom).near_edge);
}

#[test]
fn progress_tracks_clamped_fraction() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    synced(&mut controller, info(700.0, 2000.0, 600.0), &settings);
    assert!((controller.progress() - 0.5).abs() < 1e-6);
    // Overscrolled reads clamp to 1.
    let mut over = info(1400.0, 2000.0, 600.0);
    over.offset = 1600.0;
    synced(&mut controller, over, &settings);
    assert!((controller.progress() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn unscrollable_content_hides_both() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    synced(&mut controller, info(500.0, 2000.0, 600.0), &settings);
    assert!(controller.visual(Direction::Top).show);
    synced(&mut controller, info(0.0, 500.0, 600.0), &settings);
    assert!(!controller.visual(Direction::Top).show);
    assert!(!controller.visual(Direction::Bottom).show);
    assert_eq!(controller.progress(), 0.0);
}

#[test]
fn settings_toggles_gate_each_button() {
    let mut settings = Settings::default();
    settings.show_top_button = false;
    let mut controller = ButtonController::render();
    synced(&mut controller, info(700.0, 2000.0, 600.0), &settings);
    assert!(!controller.visual(Direction::Top).show);
    assert!(controller.visual(Direction::Bottom).show);
}

#[test]
fn sync_requests_coalesce_to_latest() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    controller.request_sync(info(700.0, 2000.0, 600.0));
    controller.request_sync(info(0.0, 2000.0, 600.0));
    assert!(controller.apply_pending(&settings));
    // Only the second request took effect.
    assert!(!controller.visual(Direction::Top).show);
    // The slot drained: nothing further to apply.
    assert!(!controller.apply_pending(&settings));
}

#[test]
fn destroy_cancels_pending_sync() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    controller.request_sync(info(700.0, 2000.0, 600.0));
    controller.destroy();
    assert!(!controller.has_pending_sync());
    assert!(!controller.apply_pending(&settings));
    assert!(!controller.is_rendered());
    // Requests on a destroyed pair are dropped.
    controller.request_sync(info(700.0, 2000.0, 600.0));
    assert!(!controller.has_pending_sync());
}

#[test]
fn auto_scroll_indication_is_reversible() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    assert_eq!(
        controller.tooltip(Direction::Top, &settings),
        Some("Scroll to top")
    );
    controller.indicate_auto_scrolling(Direction::Top);
    assert!(controller.visual(Direction::Top).auto_scrolling);
    assert_eq!(
        controller.tooltip(Direction::Top, &settings),
        Some("Auto-scrolling — click to stop")
    );
    controller.clear_auto_scroll_indication();
    assert!(!controller.visual(Direction::Top).auto_scrolling);
    assert_eq!(
        controller.tooltip(Direction::Top, &settings),
        Some("Scroll to top")
    );
}

#[test]
fn tooltips_disabled_by_setting() {
    let mut settings = Settings::default();
    settings.show_tooltips = false;
    let controller = ButtonController::render();
    assert_eq!(controller.tooltip(Direction::Top, &settings), None);
}

#[test]
fn suppression_hides_without_clearing_thresholds() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    synced(&mut controller, info(700.0, 2000.0, 600.0), &settings);
    assert!(controller.is_visible(Direction::Top));
    controller.set_suppressed(true);
    assert!(controller.is_suppressed());
    assert!(!controller.is_visible(Direction::Top));
    assert!(controller.visual(Direction::Top).show);
    controller.set_suppressed(false);
    assert!(!controller.is_suppressed());
    assert!(controller.is_visible(Direction::Top));
}

#[test]
fn presentation_couples_scale_and_opacity() {
    let settings = Settings::default();
    let mut controller = ButtonController::render();
    synced(&mut controller, info(700.0, 2000.0, 600.0), &settings);
    // Drive the animation to rest.
    for _ in 0..120 {
        controller.animate(1.0 / 60.0);
    }
    let visual = controller.visual(Direction::Top);
    assert!((visual.scale() - 1.0).abs() < 1e-3);
    assert!((visual.opacity() - 0.9).abs() < 1e-3);

    controller.set_suppressed(true);
    for _ in 0..120 {
        controller.animate(1.0 / 60.0);
    }
    let visual = controller.visual(Direction::Top);
    assert!((visual.scale() - 0.8).abs() < 1e-3);
    assert!(visual.opacity().abs() < 1e-3);
}

#[test]
fn placements_follow_presets() {
    let mut settings = Settings::default();
    let [top, bottom] = ButtonController::placements(&settings, 1200.0, 800.0);
    assert_eq!(top.x, bottom.x);
    assert!(top.y < bottom.y);
    assert!((top.y + bottom.y) / 2.0 - 400.0 < 1e-3);

    settings.position = ButtonPosition::TopRight;
    let [top, _] = ButtonController::placements(&settings, 1200.0, 800.0);
    assert!(top.y < 200.0);

    settings.position = ButtonPosition::BottomRight;
    let [_, bottom] = ButtonController::placements(&settings, 1200.0, 800.0);
    assert!(bottom.y > 600.0);
}
