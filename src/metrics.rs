//! Scroll metrics for the active target, and jump-scroll destinations.

use crate::buttons::Direction;
use crate::config::{ScrollUnit, Settings};
use crate::page::{PageModel, ScrollTarget};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollInfo {
    pub offset: f32,
    pub extent: f32,
    pub visible: f32,
    pub max_scroll: f32,
}

impl ScrollInfo {
    /// Scrolled fraction in `[0, 1]`; zero when there is nothing to scroll.
    pub fn progress(&self) -> f32 {
        if self.max_scroll <= 0.0 {
            0.0
        } else {
            (self.offset / self.max_scroll).clamp(0.0, 1.0)
        }
    }

    pub fn distance_from_end(&self) -> f32 {
        (self.extent - (self.offset + self.visible)).max(0.0)
    }
}

/// Read the target's current scroll metrics. A detached element target reads
/// as all-zero rather than failing; callers treat that as "nothing to
/// scroll".
pub fn read(page: &PageModel, target: ScrollTarget) -> ScrollInfo {
    match target {
        ScrollTarget::Viewport => {
            let viewport = page.viewport();
            ScrollInfo {
                offset: viewport.scroll_top,
                extent: viewport.content_height,
                visible: viewport.height,
                max_scroll: viewport.max_scroll(),
            }
        }
        ScrollTarget::Element(id) => page.element(id).map_or_else(
            || {
                tracing::warn!(?id, "scroll info read on detached element");
                ScrollInfo::default()
            },
            |node| ScrollInfo {
                offset: node.scroll_top,
                extent: node.content_height,
                visible: node.height,
                max_scroll: node.max_scroll(),
            },
        ),
    }
}

/// Absolute offset a jump scroll lands on, honoring the custom-destination
/// settings. Without custom destinations this is plain 0 / end-of-content.
pub fn jump_destination(direction: Direction, info: &ScrollInfo, settings: &Settings) -> f32 {
    let end = info.extent - info.visible;
    let destination = match direction {
        Direction::Top => {
            if !settings.custom_scroll_enabled {
                0.0
            } else {
                match settings.scroll_position_unit {
                    ScrollUnit::Percentage => {
                        settings.top_scroll_position / 100.0 * info.max_scroll.max(1.0)
                    }
                    ScrollUnit::Pixels => settings.top_scroll_position,
                }
            }
        }
        Direction::Bottom => {
            if !settings.custom_scroll_enabled {
                end
            } else {
                match settings.scroll_position_unit {
                    ScrollUnit::Percentage => {
                        end - settings.bottom_scroll_position / 100.0 * info.max_scroll.max(1.0)
                    }
                    ScrollUnit::Pixels => info.extent - settings.bottom_scroll_position,
                }
            }
        }
    };
    destination.max(0.0)
}
