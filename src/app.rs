//! eframe host harness: simulated pages, input routing, and the settings UI.
//!
//! The harness owns a [`PageModel`] for the selected demo scenario, feeds
//! user input into the [`Supervisor`] as the host events it expects, and
//! paints the floating controls the supervisor says are visible.

use std::time::{Duration, Instant};

use egui::{Context, Key};

use crate::buttons::Direction;
use crate::config::{self, Settings, SettingsPatch, SettingsStore};
use crate::page::{ElementId, ElementSpec, PageModel, ScrollTarget};
use crate::supervisor::Supervisor;

mod ui;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const CHAT_MESSAGE_HEIGHT: f32 = 88.0;
const INITIAL_CHAT_MESSAGES: usize = 40;
const ARTICLE_CONTENT_HEIGHT: f32 = 4200.0;
const STATIC_CONTENT_HEIGHT: f32 = 400.0;
const APPEND_CONTENT_HEIGHT: f32 = 900.0;

/// The demo pages. Chat scrolls a nested pane, Article scrolls the
/// viewport, Static has nothing to scroll until content is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Chat,
    Article,
    Static,
}

impl Scenario {
    const ALL: [Self; 3] = [Self::Chat, Self::Article, Self::Static];

    const fn label(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Article => "Article",
            Self::Static => "Static",
        }
    }

    const fn url(self) -> &'static str {
        match self {
            Self::Chat => "app://demo/chat",
            Self::Article => "app://demo/article",
            Self::Static => "app://demo/static",
        }
    }
}

pub struct ScrollmateApp {
    page: PageModel,
    scenario: Scenario,
    /// The chat scenario's nested conversation pane, while it exists.
    pane: Option<ElementId>,
    chat_messages: usize,
    supervisor: Supervisor,
    settings: Settings,
    store: SettingsStore,
    /// Settings as edited in the side panel, committed on Apply.
    draft: Settings,
    settings_open: bool,
    last_ack: Option<String>,
    status: Option<String>,
    focused: bool,
    /// Scroll offset the page view showed last frame, for change detection
    /// against both the model and the widget.
    view_offset: f32,
    view_size: egui::Vec2,
}

impl ScrollmateApp {
    pub fn new() -> Self {
        let store = SettingsStore::discover();
        let settings = store.load();
        let scenario = Scenario::Chat;
        let chat_messages = INITIAL_CHAT_MESSAGES;
        let (page, pane) = build_page(scenario, chat_messages);
        let supervisor = Supervisor::attach(&page, Instant::now());
        Self {
            page,
            scenario,
            pane,
            chat_messages,
            supervisor,
            draft: settings.clone(),
            settings,
            store,
            settings_open: false,
            last_ack: None,
            status: None,
            focused: true,
            view_offset: 0.0,
            view_size: egui::Vec2::ZERO,
        }
    }

    const fn view_target(&self) -> ScrollTarget {
        match self.pane {
            Some(pane) => ScrollTarget::Element(pane),
            None => ScrollTarget::Viewport,
        }
    }

    fn switch_scenario(&mut self, scenario: Scenario) {
        if self.scenario == scenario {
            return;
        }
        self.scenario = scenario;
        self.chat_messages = INITIAL_CHAT_MESSAGES;
        let (page, pane) = build_page(scenario, self.chat_messages);
        self.page = page;
        self.pane = pane;
        self.view_offset = 0.0;
        self.view_size = egui::Vec2::ZERO;
        // The supervisor spots the url change on its next tick and rebuilds
        // after the route settle delay.
        self.status = Some(format!("Navigated to {}", scenario.url()));
    }

    /// Grow the scrolled content, as a live page would when new messages or
    /// lazy-loaded sections arrive.
    fn append_content(&mut self, now: Instant) {
        match self.scenario {
            Scenario::Chat => {
                self.chat_messages += 12;
                let content = self.chat_messages as f32 * CHAT_MESSAGE_HEIGHT;
                if let Some(pane) = self.pane
                    && let Some(node) = self.page.element_mut(pane)
                {
                    node.content_height = content;
                }
            }
            Scenario::Article | Scenario::Static => {
                let content = self.page.viewport().content_height + APPEND_CONTENT_HEIGHT;
                self.page.set_viewport_content_height(content);
            }
        }
        self.supervisor.notify_mutation(now);
    }

    /// Detach the chat pane, leaving the page without its scroll container.
    fn remove_pane(&mut self, now: Instant) {
        if let Some(pane) = self.pane.take() {
            self.page.remove_element(pane);
            self.supervisor.notify_mutation(now);
            self.status = Some("Conversation pane removed".to_string());
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context, now: Instant) {
        if ctx.wants_keyboard_input() {
            return;
        }
        // Ctrl/Cmd + B: toggle the settings panel.
        if ctx.input(|i| i.key_pressed(Key::B) && i.modifiers.command) {
            self.settings_open = !self.settings_open;
            if self.settings_open {
                self.draft = self.settings.clone();
            }
        }
        if !self.settings.shortcuts_enabled {
            return;
        }
        let (to_top, to_bottom) = ctx.input(|i| {
            let combo = i.modifiers.ctrl && i.modifiers.alt;
            let to_top = (combo && (i.key_pressed(Key::ArrowUp) || i.key_pressed(Key::PageUp)))
                || (i.modifiers.ctrl && i.key_pressed(Key::Home));
            let to_bottom = (combo
                && (i.key_pressed(Key::ArrowDown) || i.key_pressed(Key::PageDown)))
                || (i.modifiers.ctrl && i.key_pressed(Key::End));
            (to_top, to_bottom)
        });
        if to_top {
            self.supervisor
                .jump(Direction::Top, &mut self.page, &self.settings);
            self.supervisor.notify_scroll(&self.page, now);
        }
        if to_bottom {
            self.supervisor
                .jump(Direction::Bottom, &mut self.page, &self.settings);
            self.supervisor.notify_scroll(&self.page, now);
        }
    }

    /// Commit the draft settings through the same message path an external
    /// settings UI would use, then re-apply visuals.
    fn apply_draft(&mut self) {
        let patch = SettingsPatch::diff(&self.settings, &self.draft);
        if patch.is_empty() {
            self.status = Some("No settings changes".to_string());
            return;
        }
        let settings_value = serde_json::to_value(&patch).unwrap_or_default();
        let message = serde_json::json!({
            "action": "updateSettings",
            "settings": settings_value,
        })
        .to_string();
        let (ack, changed) = config::handle_message(&message, &mut self.settings, &self.store);
        self.last_ack = Some(ack);
        if changed {
            self.supervisor.apply_settings(&self.page, &self.settings);
            self.draft = self.settings.clone();
            self.status = Some("Settings applied".to_string());
        }
    }
}

impl Default for ScrollmateApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for ScrollmateApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = ctx.input(|i| i.stable_dt).min(0.1);

        let focused = ctx.input(|i| i.focused);
        if focused != self.focused {
            self.focused = focused;
            self.supervisor.notify_visibility(focused, now);
        }

        self.handle_shortcuts(ctx, now);

        let mut busy = self
            .supervisor
            .tick(&mut self.page, now, dt, &self.settings);
        if self.page.tick(dt) {
            // A smooth-scroll glide moves the page like any other scroll.
            self.supervisor.notify_scroll(&self.page, now);
            busy = true;
        }
        busy |= self.page.gliding();

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui, now));
        egui::SidePanel::right("settings")
            .resizable(false)
            .default_width(300.0)
            .show_animated(ctx, self.settings_open, |ui| self.ui_settings_panel(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_page_view(ui, now));
        self.ui_overlay(ctx, now);

        // Clicks handled this frame may have armed timers the earlier tick
        // did not see.
        let controls_busy = self.supervisor.controls().is_some_and(|controls| {
            controls.machine.is_busy()
                || controls.auto_hide.is_busy()
                || controls.buttons.has_pending_sync()
        });
        if busy || controls_busy || self.page.gliding() {
            ctx.request_repaint_after(FRAME_INTERVAL);
        }
    }
}

fn build_page(scenario: Scenario, chat_messages: usize) -> (PageModel, Option<ElementId>) {
    match scenario {
        Scenario::Chat => {
            // Page chrome fits the window; only the conversation pane
            // scrolls. Heights are synced to the panel size each frame.
            let mut page = PageModel::new(scenario.url(), 0.0, 0.0);
            let pane = page.add_element(ElementSpec::scrollable(
                "div",
                &["messages-wrapper"],
                0.0,
                chat_messages as f32 * CHAT_MESSAGE_HEIGHT,
            ));
            (page, Some(pane))
        }
        Scenario::Article => (
            PageModel::new(scenario.url(), 0.0, ARTICLE_CONTENT_HEIGHT),
            None,
        ),
        Scenario::Static => (
            PageModel::new(scenario.url(), 0.0, STATIC_CONTENT_HEIGHT),
            None,
        ),
    }
}
