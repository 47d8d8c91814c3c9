use super::*;
use crate::page::ElementSpec;

fn flat_page() -> PageModel {
    PageModel::new("app://test", 600.0, 600.0)
}

#[test]
fn probe_match_beats_scrollable_viewport() {
    let mut page = PageModel::new("app://chat", 600.0, 2000.0);
    let pane = page.add_element(ElementSpec::scrollable(
        "div",
        &["messages-wrapper"],
        500.0,
        4000.0,
    ));
    assert_eq!(locate(&page), ScrollTarget::Element(pane));
}

#[test]
fn probe_order_is_priority_order() {
    let mut page = flat_page();
    // Both scrollable; "scrollbar" sits earlier in the probe list than the
    // loose class-fragment matches, so it must win even though the
    // conversation pane is taller.
    let _conversation = page.add_element(ElementSpec::scrollable(
        "div",
        &["conversation"],
        500.0,
        9000.0,
    ));
    let bar = page.add_element(ElementSpec::scrollable("div", &["scrollbar"], 400.0, 2000.0));
    assert_eq!(locate(&page), ScrollTarget::Element(bar));
}

#[test]
fn unscrollable_probe_match_is_skipped() {
    let mut page = PageModel::new("app://article", 600.0, 2000.0);
    // Matches `main` but has no overflowing content.
    page.add_element(ElementSpec::block("main", 600.0));
    assert_eq!(locate(&page), ScrollTarget::Viewport);
}

#[test]
fn overflow_hidden_is_not_scrollable() {
    let mut page = flat_page();
    let id = page.add_element(
        ElementSpec::scrollable("div", &["chat-container"], 500.0, 4000.0)
            .with_overflow(crate::page::Overflow::Hidden),
    );
    assert!(!is_scrollable(&page, id));
    assert_eq!(locate(&page), ScrollTarget::Viewport);
}

#[test]
fn tolerance_filters_near_flush_content() {
    let mut page = flat_page();
    let id = page.add_element(ElementSpec::scrollable("div", &["content"], 500.0, 508.0));
    assert!(!is_scrollable(&page, id));
}

#[test]
fn poisoned_style_read_skips_only_that_candidate() {
    let mut page = flat_page();
    let broken = page.add_element(ElementSpec::scrollable(
        "div",
        &["chat-container"],
        500.0,
        4000.0,
    ));
    page.element_mut(broken)
        .expect("element present")
        .style_poisoned = true;
    let good = page.add_element(ElementSpec::scrollable(
        "div",
        &["chat-container"],
        500.0,
        3000.0,
    ));
    assert_eq!(locate(&page), ScrollTarget::Element(good));
}

#[test]
fn scan_skips_short_elements_and_picks_largest_extent() {
    let mut page = flat_page();
    // No probe selector matches any of these.
    let _short = page.add_element(ElementSpec::scrollable("div", &["widget"], 200.0, 5000.0));
    let _mid = page.add_element(ElementSpec::scrollable("div", &["pane"], 400.0, 3000.0));
    let tall = page.add_element(ElementSpec::scrollable("div", &["panel"], 400.0, 6000.0));
    // "widget"/"pane"/"panel" contain neither "scroll" nor "overflow".
    assert_eq!(locate(&page), ScrollTarget::Element(tall));
}

#[test]
fn role_main_matches_when_classes_do_not() {
    let mut page = flat_page();
    // No class hints at all; only the landmark role identifies it.
    let pane = page.add_element(
        ElementSpec::scrollable("div", &[], 500.0, 4000.0).with_role("main"),
    );
    assert_eq!(locate(&page), ScrollTarget::Element(pane));
}

#[test]
fn class_hints_without_overflow_do_not_match() {
    let mut page = flat_page();
    page.add_element(ElementSpec::block("div", 500.0).with_classes(&["content"]));
    assert_eq!(locate(&page), ScrollTarget::Viewport);
}

#[test]
fn empty_page_falls_back_to_viewport() {
    let page = flat_page();
    assert_eq!(locate(&page), ScrollTarget::Viewport);
}

#[test]
fn locate_is_deterministic() {
    let mut page = flat_page();
    page.add_element(ElementSpec::scrollable("div", &["pane"], 400.0, 3000.0));
    page.add_element(ElementSpec::scrollable("div", &["panel"], 400.0, 3000.0));
    let first = locate(&page);
    for _ in 0..5 {
        assert_eq!(locate(&page), first);
    }
}

#[test]
fn validate_viewport_tracks_content_height() {
    let mut page = PageModel::new("app://article", 600.0, 2000.0);
    assert!(validate(&page, ScrollTarget::Viewport));
    page.set_viewport_content_height(600.0);
    assert!(!validate(&page, ScrollTarget::Viewport));
}

#[test]
fn validate_element_fails_after_removal() {
    let mut page = flat_page();
    let pane = page.add_element(ElementSpec::scrollable(
        "div",
        &["messages-wrapper"],
        500.0,
        4000.0,
    ));
    assert!(validate(&page, ScrollTarget::Element(pane)));
    page.remove_element(pane);
    assert!(!validate(&page, ScrollTarget::Element(pane)));
}

#[test]
fn validate_element_fails_when_content_shrinks() {
    let mut page = flat_page();
    let pane = page.add_element(ElementSpec::scrollable(
        "div",
        &["messages-wrapper"],
        500.0,
        4000.0,
    ));
    page.element_mut(pane).expect("element present").content_height = 500.0;
    assert!(!validate(&page, ScrollTarget::Element(pane)));
}
