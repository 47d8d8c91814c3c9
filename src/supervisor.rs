//! Lifecycle supervision: readiness, bounded build retries, SPA navigation
//! rebuilds, visibility refreshes, and mutation-driven target revalidation.
//!
//! The supervisor owns at most one live apparatus (target + buttons +
//! interaction machines) and rebuilds it across a page's lifetime. Failures
//! degrade to "controls inactive"; nothing here is surfaced to the user.

use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use crate::buttons::{ButtonController, Direction};
use crate::config::Settings;
use crate::locator;
use crate::machine::{AutoHide, ClickAction, InteractionMachine, TickAction};
use crate::metrics::{self, jump_destination};
use crate::page::{PageModel, ScrollBehavior, ScrollTarget};

const READY_SETTLE: Duration = Duration::from_millis(300);
const ALREADY_LOADED_SETTLE: Duration = Duration::from_millis(500);
const SPA_SETTLE: Duration = Duration::from_millis(800);
const VISIBILITY_REFRESH_DELAY: Duration = Duration::from_millis(100);
const MUTATION_DEBOUNCE: Duration = Duration::from_millis(300);
const MAX_BUILD_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF_STEP: Duration = Duration::from_secs(1);

/// The live apparatus: one target, one button pair, one interaction machine,
/// one auto-hide tracker.
#[derive(Debug)]
pub struct ScrollControls {
    pub target: ScrollTarget,
    pub buttons: ButtonController,
    pub machine: InteractionMachine,
    pub auto_hide: AutoHide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    WaitingForReady,
    Settling { deadline: Instant, attempt: u32 },
    Running,
    RetryWait { deadline: Instant, attempt: u32 },
    GaveUp,
}

#[derive(Debug)]
pub struct Supervisor {
    phase: Phase,
    controls: Option<ScrollControls>,
    last_url: String,
    mutation_deadline: Option<Instant>,
    refresh_deadline: Option<Instant>,
    visible: bool,
}

impl Supervisor {
    pub fn attach(page: &PageModel, now: Instant) -> Self {
        let phase = if page.loading() {
            Phase::WaitingForReady
        } else {
            // Already loaded: give dynamic content a moment longer.
            Phase::Settling {
                deadline: now + ALREADY_LOADED_SETTLE,
                attempt: 1,
            }
        };
        Self {
            phase,
            controls: None,
            last_url: page.url().to_string(),
            mutation_deadline: None,
            refresh_deadline: None,
            visible: true,
        }
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    pub const fn controls(&self) -> Option<&ScrollControls> {
        self.controls.as_ref()
    }

    pub fn status_line(&self) -> &'static str {
        match self.phase {
            Phase::WaitingForReady => "waiting for page",
            Phase::Settling { .. } => "settling",
            Phase::Running => "active",
            Phase::RetryWait { .. } => "retrying",
            Phase::GaveUp => "inactive",
        }
    }

    /// Per-frame step. Returns true while timers or animations are still in
    /// flight and the caller should keep repainting.
    pub fn tick(&mut self, page: &mut PageModel, now: Instant, dt: f32, settings: &Settings) -> bool {
        self.step_phase(page, now);
        self.check_navigation(page, now);
        self.service_deadlines(page, now);

        let mut busy = !matches!(self.phase, Phase::Running | Phase::GaveUp);
        busy |= self.mutation_deadline.is_some() || self.refresh_deadline.is_some();
        if let Some(controls) = self.controls.as_mut() {
            busy |= Self::drive_controls(controls, page, now, settings);
            busy |= controls.buttons.animate(dt);
        }
        busy
    }

    fn step_phase(&mut self, page: &PageModel, now: Instant) {
        match self.phase {
            Phase::WaitingForReady => {
                if !page.loading() {
                    self.phase = Phase::Settling {
                        deadline: now + READY_SETTLE,
                        attempt: 1,
                    };
                }
            }
            Phase::Settling { deadline, attempt } | Phase::RetryWait { deadline, attempt } => {
                if now >= deadline {
                    self.try_build(page, now, attempt);
                }
            }
            Phase::Running | Phase::GaveUp => {}
        }
    }

    fn try_build(&mut self, page: &PageModel, now: Instant, attempt: u32) {
        match build_controls(page) {
            Ok(controls) => {
                self.controls = Some(controls);
                self.phase = Phase::Running;
                tracing::info!(attempt, "scroll controls initialized");
            }
            Err(err) if attempt < MAX_BUILD_ATTEMPTS => {
                let backoff = RETRY_BACKOFF_STEP * attempt;
                tracing::warn!(attempt, %err, "initialization failed, retrying");
                self.phase = Phase::RetryWait {
                    deadline: now + backoff,
                    attempt: attempt + 1,
                };
            }
            Err(err) => {
                tracing::error!(%err, "initialization failed, giving up");
                self.phase = Phase::GaveUp;
            }
        }
    }

    fn check_navigation(&mut self, page: &PageModel, now: Instant) {
        if page.url() == self.last_url {
            return;
        }
        tracing::info!(url = page.url(), "navigation detected, rebuilding");
        self.last_url = page.url().to_string();
        self.teardown();
        self.phase = Phase::Settling {
            deadline: now + SPA_SETTLE,
            attempt: 1,
        };
    }

    fn service_deadlines(&mut self, page: &PageModel, now: Instant) {
        if let Some(deadline) = self.mutation_deadline
            && now >= deadline
        {
            self.mutation_deadline = None;
            self.revalidate_target(page);
        }
        if let Some(deadline) = self.refresh_deadline
            && now >= deadline
        {
            self.refresh_deadline = None;
            self.request_sync(page);
        }
    }

    /// Mutation debounce fired: confirm the target is still usable and
    /// re-locate when it is not.
    fn revalidate_target(&mut self, page: &PageModel) {
        let Some(controls) = self.controls.as_mut() else {
            return;
        };
        if !locator::validate(page, controls.target) {
            let new_target = locator::locate(page);
            if new_target != controls.target {
                tracing::info!(?new_target, "scroll target changed, rebinding");
                controls.target = new_target;
                // Bindings move to the new target; a session against the old
                // one must not keep running.
                controls.machine.reset();
                controls.buttons.clear_auto_scroll_indication();
            }
        }
        controls.buttons.request_sync(metrics::read(page, controls.target));
    }

    fn drive_controls(
        controls: &mut ScrollControls,
        page: &mut PageModel,
        now: Instant,
        settings: &Settings,
    ) -> bool {
        let info = metrics::read(page, controls.target);
        let mut busy = controls.machine.is_busy() || controls.auto_hide.is_busy();
        match controls.machine.tick(now, &info) {
            TickAction::SessionStarted(direction) => {
                controls.buttons.indicate_auto_scrolling(direction);
                controls.buttons.request_sync(info);
                busy = true;
            }
            TickAction::Advance { delta } => {
                page.scroll_by(controls.target, delta);
                controls.auto_hide.note_scroll(now);
                controls
                    .buttons
                    .request_sync(metrics::read(page, controls.target));
                busy = true;
            }
            TickAction::SessionEnded => {
                controls.buttons.clear_auto_scroll_indication();
                controls.buttons.request_sync(info);
            }
            TickAction::None => {}
        }

        if controls.auto_hide.tick(now, settings) {
            busy = true;
        }
        controls
            .buttons
            .set_suppressed(controls.auto_hide.is_hidden());
        controls.buttons.apply_pending(settings);
        busy
    }

    /// A click landed on one of the controls.
    pub fn handle_click(
        &mut self,
        direction: Direction,
        page: &mut PageModel,
        now: Instant,
        settings: &Settings,
    ) {
        let Some(controls) = self.controls.as_mut() else {
            return;
        };
        if !controls.buttons.is_visible(direction) {
            return;
        }
        match controls.machine.handle_click(direction, now) {
            ClickAction::Armed => {}
            ClickAction::Jump(direction) => {
                Self::jump_scroll(controls, page, direction, settings);
            }
            ClickAction::StoppedSession => {
                controls.buttons.clear_auto_scroll_indication();
            }
        }
        controls.buttons.request_sync(metrics::read(page, controls.target));
    }

    /// Immediate jump to the configured destination, bypassing click
    /// classification. Used by keyboard shortcuts.
    pub fn jump(&mut self, direction: Direction, page: &mut PageModel, settings: &Settings) {
        let Some(controls) = self.controls.as_mut() else {
            return;
        };
        // A shortcut jump also cancels any continuous scroll.
        if controls.machine.is_auto_scrolling() {
            controls.machine.reset();
            controls.buttons.clear_auto_scroll_indication();
        }
        Self::jump_scroll(controls, page, direction, settings);
        controls.buttons.request_sync(metrics::read(page, controls.target));
    }

    fn jump_scroll(
        controls: &mut ScrollControls,
        page: &mut PageModel,
        direction: Direction,
        settings: &Settings,
    ) {
        let info = metrics::read(page, controls.target);
        let destination = jump_destination(direction, &info, settings);
        let behavior = if settings.smooth_scrolling {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        page.scroll_to(controls.target, destination, behavior);
    }

    /// Host-reported scroll activity on the bound target.
    pub fn notify_scroll(&mut self, page: &PageModel, now: Instant) {
        if let Some(controls) = self.controls.as_mut() {
            controls.auto_hide.note_scroll(now);
            controls.buttons.request_sync(metrics::read(page, controls.target));
        }
    }

    /// Host-reported viewport resize.
    pub fn notify_resize(&mut self, page: &PageModel) {
        self.request_sync(page);
    }

    /// Pointer entered or left the control cluster.
    pub fn notify_hover(&mut self, hovering: bool, now: Instant, settings: &Settings) {
        if let Some(controls) = self.controls.as_mut() {
            controls.auto_hide.set_hovering(hovering, now, settings);
        }
    }

    /// Structural DOM change; revalidation runs after the debounce.
    pub fn notify_mutation(&mut self, now: Instant) {
        self.mutation_deadline = Some(now + MUTATION_DEBOUNCE);
    }

    /// Tab visibility flipped; a refresh is scheduled on return.
    pub fn notify_visibility(&mut self, visible: bool, now: Instant) {
        if visible && !self.visible {
            self.refresh_deadline = Some(now + VISIBILITY_REFRESH_DELAY);
        }
        self.visible = visible;
    }

    /// Settings changed: cancel timers that no longer apply and re-apply
    /// visuals immediately.
    pub fn apply_settings(&mut self, page: &PageModel, settings: &Settings) {
        if let Some(controls) = self.controls.as_mut() {
            controls.auto_hide.apply_settings(settings);
            controls
                .buttons
                .set_suppressed(controls.auto_hide.is_hidden());
            controls.buttons.request_sync(metrics::read(page, controls.target));
        }
    }

    fn request_sync(&mut self, page: &PageModel) {
        if let Some(controls) = self.controls.as_mut() {
            controls.buttons.request_sync(metrics::read(page, controls.target));
        }
    }

    /// Destroy the apparatus and every pending timer. Safe to call twice.
    pub fn teardown(&mut self) {
        if let Some(mut controls) = self.controls.take() {
            controls.buttons.destroy();
            controls.machine.reset();
            controls.auto_hide.reset();
        }
        self.mutation_deadline = None;
        self.refresh_deadline = None;
    }
}

fn build_controls(page: &PageModel) -> Result<ScrollControls> {
    if page.viewport().height <= 0.0 {
        bail!("viewport has no layout yet");
    }
    let target = locator::locate(page);
    let mut buttons = ButtonController::render();
    buttons.request_sync(metrics::read(page, target));
    Ok(ScrollControls {
        target,
        buttons,
        machine: InteractionMachine::new(),
        auto_hide: AutoHide::new(),
    })
}
