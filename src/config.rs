//! Persisted settings and the external settings-update interface.
//!
//! The record is stored as TOML in the platform config directory; partial
//! updates arrive as JSON `updateSettings` messages from the settings UI.
//! Field names on the wire stay camelCase for compatibility with records
//! persisted by earlier releases.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "scrollmate.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollUnit {
    Percentage,
    Pixels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPosition {
    MiddleRight,
    TopRight,
    BottomRight,
}

/// Flat settings record. Every field has a default; unknown incoming fields
/// are ignored and missing fields fall back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub show_top_button: bool,
    pub show_bottom_button: bool,
    pub show_progress_ring: bool,
    pub show_tooltips: bool,
    pub custom_scroll_enabled: bool,
    pub top_scroll_position: f32,
    pub bottom_scroll_position: f32,
    #[serde(rename = "scrollType")]
    pub scroll_position_unit: ScrollUnit,
    pub smooth_scrolling: bool,
    #[serde(rename = "enableShortcuts")]
    pub shortcuts_enabled: bool,
    pub position: ButtonPosition,
    pub auto_hide: bool,
    pub hide_delay_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_top_button: true,
            show_bottom_button: true,
            show_progress_ring: true,
            show_tooltips: true,
            custom_scroll_enabled: false,
            top_scroll_position: 0.0,
            bottom_scroll_position: 100.0,
            scroll_position_unit: ScrollUnit::Percentage,
            smooth_scrolling: true,
            shortcuts_enabled: true,
            position: ButtonPosition::MiddleRight,
            auto_hide: false,
            hide_delay_seconds: 3.0,
        }
    }
}

impl Settings {
    /// Shallow field-wise override; absent patch fields leave the current
    /// value untouched.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) {
        macro_rules! merge {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = patch.$field {
                    self.$field = value;
                })+
            };
        }
        merge!(
            show_top_button,
            show_bottom_button,
            show_progress_ring,
            show_tooltips,
            custom_scroll_enabled,
            top_scroll_position,
            bottom_scroll_position,
            scroll_position_unit,
            smooth_scrolling,
            shortcuts_enabled,
            position,
            auto_hide,
            hide_delay_seconds,
        );
    }

    pub fn hide_delay_secs(&self) -> f32 {
        self.hide_delay_seconds.clamp(0.5, 120.0)
    }
}

/// Partial settings as carried by an `updateSettings` message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_top_button: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_bottom_button: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_progress_ring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tooltips: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_scroll_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_scroll_position: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_scroll_position: Option<f32>,
    #[serde(rename = "scrollType", skip_serializing_if = "Option::is_none")]
    pub scroll_position_unit: Option<ScrollUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth_scrolling: Option<bool>,
    #[serde(rename = "enableShortcuts", skip_serializing_if = "Option::is_none")]
    pub shortcuts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<ButtonPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_hide: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_delay_seconds: Option<f32>,
}

impl SettingsPatch {
    /// The fields of `next` that differ from `current`; what a settings UI
    /// submits so unchanged options stay untouched on other devices.
    pub fn diff(current: &Settings, next: &Settings) -> Self {
        macro_rules! changed {
            ($field:ident) => {
                (current.$field != next.$field).then_some(next.$field)
            };
        }
        Self {
            show_top_button: changed!(show_top_button),
            show_bottom_button: changed!(show_bottom_button),
            show_progress_ring: changed!(show_progress_ring),
            show_tooltips: changed!(show_tooltips),
            custom_scroll_enabled: changed!(custom_scroll_enabled),
            top_scroll_position: changed!(top_scroll_position),
            bottom_scroll_position: changed!(bottom_scroll_position),
            scroll_position_unit: changed!(scroll_position_unit),
            smooth_scrolling: changed!(smooth_scrolling),
            shortcuts_enabled: changed!(shortcuts_enabled),
            position: changed!(position),
            auto_hide: changed!(auto_hide),
            hide_delay_seconds: changed!(hide_delay_seconds),
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                show_top_button: None,
                show_bottom_button: None,
                show_progress_ring: None,
                show_tooltips: None,
                custom_scroll_enabled: None,
                top_scroll_position: None,
                bottom_scroll_position: None,
                scroll_position_unit: None,
                smooth_scrolling: None,
                shortcuts_enabled: None,
                position: None,
                auto_hide: None,
                hide_delay_seconds: None,
            }
        )
    }
}

/// Loads and saves the settings record. All I/O failures degrade to the
/// in-memory state with a log line; callers never see an error.
#[derive(Debug)]
pub struct SettingsStore {
    save_path: Option<PathBuf>,
}

impl SettingsStore {
    /// Store rooted at the platform config directory.
    pub fn discover() -> Self {
        let save_path = ProjectDirs::from("dev", "Scrollmate", "Scrollmate")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));
        Self { save_path }
    }

    /// Store pinned to an explicit file, used by tests.
    pub const fn at_path(path: PathBuf) -> Self {
        Self {
            save_path: Some(path),
        }
    }

    pub fn load(&self) -> Settings {
        for path in self.candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match toml::from_str::<Settings>(&contents) {
                    Ok(settings) => return settings,
                    Err(err) => {
                        tracing::warn!(path = %path.display(), %err, "failed to parse settings");
                    }
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, settings: &Settings) {
        if let Err(err) = self.try_save(settings) {
            tracing::warn!(%err, "failed to save settings");
        }
    }

    fn try_save(&self, settings: &Settings) -> Result<()> {
        let path = self
            .save_path
            .as_ref()
            .context("no writable settings location")?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create settings dir {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(settings).context("serialize settings")?;
        fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    fn candidate_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = &self.save_path {
            paths.push(path.clone());
        }
        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(
                base_dirs
                    .config_dir()
                    .join("scrollmate")
                    .join(CONFIG_FILE_NAME),
            );
        }
        paths
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum ControlMessage {
    UpdateSettings { settings: SettingsPatch },
}

#[derive(Debug, Serialize)]
struct Ack {
    success: bool,
}

/// Handle one inbound control message. Returns the acknowledgement to send
/// back (always `{"success":true}`, matching the original protocol) and
/// whether the settings changed and visuals must be re-applied.
pub fn handle_message(raw: &str, settings: &mut Settings, store: &SettingsStore) -> (String, bool) {
    let ack = serde_json::to_string(&Ack { success: true })
        .unwrap_or_else(|_| String::from("{\"success\":true}"));
    match serde_json::from_str::<ControlMessage>(raw) {
        Ok(ControlMessage::UpdateSettings { settings: patch }) => {
            settings.apply_patch(&patch);
            store.save(settings);
            tracing::debug!("settings updated via control message");
            (ack, true)
        }
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed control message");
            (ack, false)
        }
    }
}

#[cfg(test)]
mod tests;
