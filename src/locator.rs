//! Scrollable-container detection.
//!
//! Pages rarely scroll where you expect: chat apps scroll a nested pane,
//! articles scroll the viewport, some pages scroll nothing at all. The
//! locator runs a prioritized, bounded search and always produces a target.

use crate::page::{ElementId, ElementNode, Overflow, PageModel, ScrollTarget, Selector};

/// Content must exceed the visible extent by more than this to count as
/// scrollable; filters sub-pixel rounding and hidden scrollbars.
const SCROLLABLE_TOLERANCE: f32 = 10.0;

/// Elements shorter than this are noise for the last-resort scan.
const MIN_CANDIDATE_HEIGHT: f32 = 300.0;

/// Probe order: chat/content panes first, then generic landmarks, then
/// loose class-fragment matches. First scrollable hit wins.
const PROBE_SELECTORS: &[Selector] = &[
    Selector::Class("overflow-y-auto"),
    Selector::Class("scrollbar"),
    Selector::Tag("main"),
    Selector::Tag("article"),
    Selector::Class("main-content"),
    Selector::Class("content"),
    Selector::Class("scroll-container"),
    Selector::Class("chat-container"),
    Selector::Class("messages-wrapper"),
    Selector::Class("conversation"),
    Selector::Role("main"),
    Selector::ClassContains("scroll"),
    Selector::ClassContains("overflow"),
];

/// True when the element both declares vertical scrolling and actually has
/// overflowing content. A failed style read disqualifies only this
/// candidate.
pub fn is_scrollable(page: &PageModel, id: ElementId) -> bool {
    let overflow = match page.computed_overflow(id) {
        Ok(overflow) => overflow,
        Err(err) => {
            tracing::debug!(?id, %err, "style read failed, skipping candidate");
            return false;
        }
    };
    if !matches!(overflow, Overflow::Auto | Overflow::Scroll) {
        return false;
    }
    page.element(id)
        .is_some_and(|node| node.content_height > node.height + SCROLLABLE_TOLERANCE)
}

fn viewport_scrollable(page: &PageModel) -> bool {
    let viewport = page.viewport();
    viewport.content_height > viewport.height
}

/// Pick the scrollable region the controls should drive. Deterministic and
/// read-only; never fails to produce a target.
pub fn locate(page: &PageModel) -> ScrollTarget {
    for &selector in PROBE_SELECTORS {
        for id in page.query(selector) {
            if is_scrollable(page, id) {
                tracing::debug!(?selector, ?id, "scroll container matched probe");
                return ScrollTarget::Element(id);
            }
        }
    }

    if viewport_scrollable(page) {
        tracing::debug!("using viewport as scroll container");
        return ScrollTarget::Viewport;
    }

    // Last resort: bounded scan over the visible tree, largest content wins.
    let mut best: Option<&ElementNode> = None;
    for node in page.elements() {
        if node.tag == "body" || node.tag == "html" {
            continue;
        }
        if node.height < MIN_CANDIDATE_HEIGHT {
            continue;
        }
        if !is_scrollable(page, node.id) {
            continue;
        }
        if best.is_none_or(|b| node.content_height > b.content_height) {
            best = Some(node);
        }
    }

    best.map_or_else(
        || {
            tracing::debug!("no scrollable container found, defaulting to viewport");
            ScrollTarget::Viewport
        },
        |node| {
            tracing::debug!(id = ?node.id, "scan picked largest scrollable element");
            ScrollTarget::Element(node.id)
        },
    )
}

/// Whether the current target is still usable. Invalid targets trigger a
/// fresh [`locate`] and, when the result differs, a rebind of scroll
/// bindings.
pub fn validate(page: &PageModel, target: ScrollTarget) -> bool {
    match target {
        ScrollTarget::Viewport => viewport_scrollable(page),
        ScrollTarget::Element(id) => page.contains(id) && is_scrollable(page, id),
    }
}

#[cfg(test)]
mod tests;
