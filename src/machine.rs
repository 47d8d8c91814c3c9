//! Pointer-input classification and scroll-driven visibility.
//!
//! Two independent machines live here. [`InteractionMachine`] decides what a
//! click means — arm a classification window, jump on a double click, start
//! a continuous auto-scroll on a lone click, stop a running session — and
//! drives the session frame by frame. [`AutoHide`] tracks scroll activity
//! and hover to fade the controls out after a configured quiet period.
//!
//! All timing is `Instant` deadlines checked from the per-frame tick; no
//! callbacks, no hidden timers.

use std::time::{Duration, Instant};

use crate::buttons::Direction;
use crate::config::Settings;
use crate::metrics::ScrollInfo;

/// Window for telling a double click from a single one.
pub const CLICK_WINDOW: Duration = Duration::from_millis(300);

/// Quiet period after the last scroll event before "scrolling" drops.
const SCROLL_STOP_DEBOUNCE: Duration = Duration::from_millis(150);

const INITIAL_SPEED: f32 = 4.0;
const SPEED_INCREMENT: f32 = 0.5;
const MAX_SPEED: f32 = 40.0;

/// A running continuous scroll. At most one exists at a time.
#[derive(Debug, Clone, Copy)]
pub struct AutoScrollSession {
    pub direction: Direction,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    AwaitingSecondClick {
        direction: Direction,
        deadline: Instant,
    },
    AutoScrolling(AutoScrollSession),
}

/// What a click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// First click: classification window armed, nothing visible yet.
    Armed,
    /// Double click: jump immediately.
    Jump(Direction),
    /// A session was running (or due); the click stopped it.
    StoppedSession,
}

/// What the per-frame tick decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickAction {
    None,
    /// The classification window expired with no second click.
    SessionStarted(Direction),
    /// Advance the scroll offset by `delta` (negative toward the top).
    Advance { delta: f32 },
    /// The session reached its boundary and ended.
    SessionEnded,
}

#[derive(Debug)]
pub struct InteractionMachine {
    state: State,
}

impl Default for InteractionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionMachine {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    pub const fn is_auto_scrolling(&self) -> bool {
        matches!(self.state, State::AutoScrolling(_))
    }

    /// True while a classification window or session needs frame ticks.
    pub const fn is_busy(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    pub const fn session(&self) -> Option<AutoScrollSession> {
        match self.state {
            State::AutoScrolling(session) => Some(session),
            _ => None,
        }
    }

    /// Classify a click on one of the controls.
    pub fn handle_click(&mut self, direction: Direction, now: Instant) -> ClickAction {
        match self.state {
            State::Idle => {
                self.state = State::AwaitingSecondClick {
                    direction,
                    deadline: now + CLICK_WINDOW,
                };
                ClickAction::Armed
            }
            State::AwaitingSecondClick {
                direction: first,
                deadline,
            } => {
                if now >= deadline {
                    // The window lapsed but the frame tick has not run yet;
                    // the pending single click was due to become a session,
                    // and a click stops a session.
                    self.state = State::Idle;
                    return ClickAction::StoppedSession;
                }
                if first == direction {
                    self.state = State::Idle;
                    return ClickAction::Jump(direction);
                }
                // Opposite control: not a double click. The new click takes
                // over the single classification window.
                self.state = State::AwaitingSecondClick {
                    direction,
                    deadline: now + CLICK_WINDOW,
                };
                ClickAction::Armed
            }
            State::AutoScrolling(_) => {
                // Click-to-stop is universal regardless of which control.
                self.state = State::Idle;
                ClickAction::StoppedSession
            }
        }
    }

    /// Per-frame step: expire the classification window, advance a running
    /// session, and end it exactly at the boundary.
    pub fn tick(&mut self, now: Instant, info: &ScrollInfo) -> TickAction {
        match self.state {
            State::Idle => TickAction::None,
            State::AwaitingSecondClick {
                direction,
                deadline,
            } => {
                if now < deadline {
                    return TickAction::None;
                }
                self.state = State::AutoScrolling(AutoScrollSession {
                    direction,
                    speed: INITIAL_SPEED,
                });
                tracing::debug!(?direction, "auto-scroll session started");
                TickAction::SessionStarted(direction)
            }
            State::AutoScrolling(mut session) => {
                let remaining = match session.direction {
                    Direction::Top => info.offset,
                    Direction::Bottom => (info.max_scroll - info.offset).max(0.0),
                };
                if remaining <= 0.0 || info.max_scroll <= 0.0 {
                    self.state = State::Idle;
                    tracing::debug!("auto-scroll session reached boundary");
                    return TickAction::SessionEnded;
                }
                // Advance at the current speed, clamped so the boundary is
                // never overshot; accelerate for the next frame.
                let step = session.speed.min(remaining);
                let delta = match session.direction {
                    Direction::Top => -step,
                    Direction::Bottom => step,
                };
                session.speed = (session.speed + SPEED_INCREMENT).min(MAX_SPEED);
                self.state = State::AutoScrolling(session);
                TickAction::Advance { delta }
            }
        }
    }

    /// Abandon whatever is pending. Used on teardown.
    pub const fn reset(&mut self) {
        self.state = State::Idle;
    }
}

/// Scroll-activity tracker driving the fade-out of the controls.
#[derive(Debug, Default)]
pub struct AutoHide {
    scrolling: bool,
    last_scroll: Option<Instant>,
    hovering: bool,
    hide_deadline: Option<Instant>,
    hidden: bool,
}

impl AutoHide {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// True while the debounce or hide timer still needs frame ticks.
    pub const fn is_busy(&self) -> bool {
        self.scrolling || self.hide_deadline.is_some()
    }

    /// Any scroll activity shows the controls immediately and cancels a
    /// pending fade.
    pub const fn note_scroll(&mut self, now: Instant) {
        self.scrolling = true;
        self.last_scroll = Some(now);
        self.hidden = false;
        self.hide_deadline = None;
    }

    /// Hovering a control always shows it and suspends the fade; leaving
    /// re-arms the timer while auto-hide is enabled.
    pub fn set_hovering(&mut self, hovering: bool, now: Instant, settings: &Settings) {
        if self.hovering == hovering {
            return;
        }
        self.hovering = hovering;
        if hovering {
            self.hidden = false;
            self.hide_deadline = None;
        } else if settings.auto_hide && !self.scrolling {
            self.hide_deadline = Some(now + Self::delay(settings));
        }
    }

    /// Settings changed; dropping auto-hide cancels a pending fade and
    /// keeps the controls visible.
    pub const fn apply_settings(&mut self, settings: &Settings) {
        if !settings.auto_hide {
            self.hide_deadline = None;
            self.hidden = false;
        }
    }

    /// Advance debounce and fade timers. Returns true when the hidden flag
    /// flipped this frame.
    pub fn tick(&mut self, now: Instant, settings: &Settings) -> bool {
        let was_hidden = self.hidden;

        if self.scrolling
            && let Some(last) = self.last_scroll
            && now.duration_since(last) >= SCROLL_STOP_DEBOUNCE
        {
            self.scrolling = false;
            if settings.auto_hide && !self.hovering {
                self.hide_deadline = Some(now + Self::delay(settings));
            }
        }

        if let Some(deadline) = self.hide_deadline
            && now >= deadline
        {
            self.hide_deadline = None;
            if settings.auto_hide && !self.hovering {
                self.hidden = true;
            }
        }

        self.hidden != was_hidden
    }

    /// Abandon all pending timers. Used on teardown.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn delay(settings: &Settings) -> Duration {
        Duration::from_secs_f32(settings.hide_delay_secs())
    }
}
