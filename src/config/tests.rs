use super::*;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_file(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("scrollmate_{label}_{nanos}.toml"))
}

#[test]
fn defaults_match_shipped_record() {
    let settings = Settings::default();
    assert!(settings.show_top_button);
    assert!(settings.show_bottom_button);
    assert!(settings.show_progress_ring);
    assert!(!settings.custom_scroll_enabled);
    assert_eq!(settings.scroll_position_unit, ScrollUnit::Percentage);
    assert_eq!(settings.position, ButtonPosition::MiddleRight);
    assert!(!settings.auto_hide);
    assert!((settings.hide_delay_seconds - 3.0).abs() < f32::EPSILON);
}

#[test]
fn unknown_and_missing_fields_are_tolerated() {
    let json = r#"{
        "showTopButton": false,
        "scrollType": "pixels",
        "someFutureOption": 42
    }"#;
    let settings: Settings = serde_json::from_str(json).expect("parse settings");
    assert!(!settings.show_top_button);
    assert_eq!(settings.scroll_position_unit, ScrollUnit::Pixels);
    // Missing field falls back to default.
    assert!(settings.show_bottom_button);
}

#[test]
fn patch_overrides_only_present_fields() {
    let mut settings = Settings::default();
    let patch: SettingsPatch = serde_json::from_str(
        r#"{"autoHide": true, "hideDelaySeconds": 7.5, "position": "top-right"}"#,
    )
    .expect("parse patch");
    settings.apply_patch(&patch);
    assert!(settings.auto_hide);
    assert!((settings.hide_delay_seconds - 7.5).abs() < f32::EPSILON);
    assert_eq!(settings.position, ButtonPosition::TopRight);
    assert!(settings.show_top_button);
    assert!(settings.smooth_scrolling);
}

#[test]
fn store_roundtrip_preserves_record() {
    let path = unique_temp_file("roundtrip");
    let store = SettingsStore::at_path(path.clone());
    let mut settings = Settings::default();
    settings.auto_hide = true;
    settings.bottom_scroll_position = 42.0;
    settings.position = ButtonPosition::BottomRight;
    store.save(&settings);

    let loaded = store.load();
    assert_eq!(loaded, settings);
    let _ = fs::remove_file(path);
}

#[test]
fn load_falls_back_to_defaults_on_parse_error() {
    let path = unique_temp_file("corrupt");
    fs::write(&path, "not = [valid").expect("write corrupt file");
    let store = SettingsStore::at_path(path.clone());
    assert_eq!(store.load(), Settings::default());
    let _ = fs::remove_file(path);
}

#[test]
fn update_message_applies_patch_and_acks() {
    let path = unique_temp_file("message");
    let store = SettingsStore::at_path(path.clone());
    let mut settings = Settings::default();
    let raw = r#"{"action":"updateSettings","settings":{"smoothScrolling":false,"enableShortcuts":false}}"#;
    let (ack, changed) = handle_message(raw, &mut settings, &store);
    assert_eq!(ack, r#"{"success":true}"#);
    assert!(changed);
    assert!(!settings.smooth_scrolling);
    assert!(!settings.shortcuts_enabled);
    // Persisted as part of handling.
    assert_eq!(store.load(), settings);
    let _ = fs::remove_file(path);
}

#[test]
fn diff_serializes_only_changed_fields() {
    let current = Settings::default();
    let mut next = current.clone();
    next.auto_hide = true;
    next.position = ButtonPosition::TopRight;
    let patch = SettingsPatch::diff(&current, &next);
    assert!(!patch.is_empty());
    let json = serde_json::to_string(&patch).expect("serialize patch");
    assert_eq!(json, r#"{"position":"top-right","autoHide":true}"#);
    assert!(SettingsPatch::diff(&current, &current).is_empty());
}

#[test]
fn malformed_message_still_acks_success() {
    let store = SettingsStore::at_path(unique_temp_file("bad"));
    let mut settings = Settings::default();
    let (ack, changed) = handle_message("{\"action\":\"selfDestruct\"}", &mut settings, &store);
    assert_eq!(ack, r#"{"success":true}"#);
    assert!(!changed);
    assert_eq!(settings, Settings::default());
}
