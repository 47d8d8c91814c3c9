//! State for the two floating controls: visibility thresholds, progress
//! ring fraction, auto-scroll indication, placement presets, and the
//! coalesced per-frame visual sync.
//!
//! Drawing is the ui layer's job; this module owns what is shown, not how.

use crate::config::{ButtonPosition, Settings};
use crate::metrics::ScrollInfo;

const TOP_SHOW_THRESHOLD: f32 = 100.0;
const BOTTOM_SHOW_THRESHOLD: f32 = 50.0;
const NEAR_EDGE_THRESHOLD: f32 = 10.0;

/// Ring geometry from the control markup: r = 20.
pub const RING_CIRCUMFERENCE: f32 = 125.6;
pub const BUTTON_DIAMETER: f32 = 44.0;

const EDGE_INSET: f32 = 56.0;
const CORNER_INSET: f32 = 80.0;
const PAIR_SPACING: f32 = 60.0;

const SHOW_ANIM_RESPONSE: f32 = 0.12;
const SHOW_ANIM_SNAP_EPS: f32 = 0.01;

const HIDDEN_SCALE: f32 = 0.8;
const SHOWN_OPACITY: f32 = 0.9;

/// Which control — equivalently, which way its scroll heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Top,
    Bottom,
}

impl Direction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "Scroll to top",
            Self::Bottom => "Scroll to bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonVisual {
    pub show: bool,
    pub near_edge: bool,
    pub auto_scrolling: bool,
    /// Eased presentation 0..1; transform and opacity derive from it
    /// together so the pair never pops out of sync.
    pub presence: f32,
}

impl ButtonVisual {
    pub fn scale(&self) -> f32 {
        HIDDEN_SCALE + (1.0 - HIDDEN_SCALE) * self.presence
    }

    pub fn opacity(&self) -> f32 {
        SHOWN_OPACITY * self.presence
    }
}

/// On-screen anchor (center) for one control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug)]
pub struct ButtonController {
    rendered: bool,
    top: ButtonVisual,
    bottom: ButtonVisual,
    progress: f32,
    /// Latest requested sync; overwritten by newer requests and applied at
    /// most once per frame.
    pending: Option<ScrollInfo>,
    /// Auto-hide override: thresholds may want a button shown while the
    /// hide timer has faded the pair out.
    suppressed: bool,
}

impl ButtonController {
    /// Create the pair. Idempotent: an existing pair is torn down first.
    pub fn render() -> Self {
        Self {
            rendered: true,
            top: ButtonVisual::default(),
            bottom: ButtonVisual::default(),
            progress: 0.0,
            pending: None,
            suppressed: false,
        }
    }

    /// Remove both controls and drop any pending sync.
    pub fn destroy(&mut self) {
        self.rendered = false;
        self.pending = None;
        self.top = ButtonVisual::default();
        self.bottom = ButtonVisual::default();
        self.progress = 0.0;
        self.suppressed = false;
    }

    pub const fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub const fn visual(&self, direction: Direction) -> &ButtonVisual {
        match direction {
            Direction::Top => &self.top,
            Direction::Bottom => &self.bottom,
        }
    }

    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Queue a visual sync for the next frame. Last write wins; nothing is
    /// queued beyond the single pending slot.
    pub fn request_sync(&mut self, info: ScrollInfo) {
        if self.rendered {
            self.pending = Some(info);
        }
    }

    pub const fn has_pending_sync(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the pending sync, if any. Called once per painted frame.
    pub fn apply_pending(&mut self, settings: &Settings) -> bool {
        let Some(info) = self.pending.take() else {
            return false;
        };
        self.apply(&info, settings);
        true
    }

    fn apply(&mut self, info: &ScrollInfo, settings: &Settings) {
        if info.max_scroll <= 0.0 {
            self.top.show = false;
            self.bottom.show = false;
            self.progress = 0.0;
            return;
        }
        self.progress = info.progress();

        let distance_from_bottom = info.distance_from_end();
        self.top.show = settings.show_top_button && info.offset > TOP_SHOW_THRESHOLD;
        self.bottom.show =
            settings.show_bottom_button && distance_from_bottom > BOTTOM_SHOW_THRESHOLD;
        self.top.near_edge = info.offset < NEAR_EDGE_THRESHOLD;
        self.bottom.near_edge = distance_from_bottom < NEAR_EDGE_THRESHOLD;
    }

    /// Auto-hide override; while set, both controls present as hidden
    /// regardless of thresholds.
    pub const fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub const fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Whether a control is currently meant to be visible on screen.
    pub fn is_visible(&self, direction: Direction) -> bool {
        self.rendered && !self.suppressed && self.visual(direction).show
    }

    pub const fn indicate_auto_scrolling(&mut self, direction: Direction) {
        self.top.auto_scrolling = matches!(direction, Direction::Top);
        self.bottom.auto_scrolling = matches!(direction, Direction::Bottom);
    }

    pub const fn clear_auto_scroll_indication(&mut self) {
        self.top.auto_scrolling = false;
        self.bottom.auto_scrolling = false;
    }

    /// Tooltip for a control, or `None` when tooltips are disabled.
    pub fn tooltip(&self, direction: Direction, settings: &Settings) -> Option<&'static str> {
        if !settings.show_tooltips {
            return None;
        }
        if self.visual(direction).auto_scrolling {
            return Some("Auto-scrolling — click to stop");
        }
        Some(match direction {
            Direction::Top => "Scroll to top",
            Direction::Bottom => "Scroll to bottom",
        })
    }

    /// Anchor centers for the pair given the configured preset and the
    /// current viewport size. Top control is always the upper of the two.
    pub fn placements(settings: &Settings, width: f32, height: f32) -> [Placement; 2] {
        let x = width - EDGE_INSET;
        let (top_y, bottom_y) = match settings.position {
            ButtonPosition::MiddleRight => {
                let mid = height / 2.0;
                (mid - PAIR_SPACING / 2.0, mid + PAIR_SPACING / 2.0)
            }
            ButtonPosition::TopRight => (CORNER_INSET, CORNER_INSET + PAIR_SPACING),
            ButtonPosition::BottomRight => {
                (height - CORNER_INSET - PAIR_SPACING, height - CORNER_INSET)
            }
        };
        [Placement { x, y: top_y }, Placement { x, y: bottom_y }]
    }

    /// Ease each control's presentation toward its visibility. Returns true
    /// while any control is still animating.
    pub fn animate(&mut self, dt: f32) -> bool {
        let top_target = if self.is_visible(Direction::Top) {
            1.0
        } else {
            0.0
        };
        let bottom_target = if self.is_visible(Direction::Bottom) {
            1.0
        } else {
            0.0
        };
        let alpha = 1.0 - (1.0 - 0.90f32).powf(dt.min(0.1) / SHOW_ANIM_RESPONSE);
        let mut animating = false;
        for (visual, target) in [
            (&mut self.top, top_target),
            (&mut self.bottom, bottom_target),
        ] {
            let delta = target - visual.presence;
            if delta.abs() <= SHOW_ANIM_SNAP_EPS {
                visual.presence = target;
            } else {
                visual.presence = delta.mul_add(alpha, visual.presence);
                animating = true;
            }
        }
        animating
    }
}

#[cfg(test)]
mod tests;
