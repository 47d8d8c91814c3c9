//! In-memory model of the host page: an element list with selector hints,
//! geometry, overflow styles, and scroll state.
//!
//! The engine never touches a real DOM; it reads and scrolls a `PageModel`.
//! The harness mutates the model from user input, and tests build fixture
//! models directly.

use anyhow::{Result, bail};

const SMOOTH_SCROLL_RESPONSE: f32 = 0.18;
const SMOOTH_SCROLL_SNAP_EPS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    Visible,
    Hidden,
    Auto,
    Scroll,
}

/// One element of the host page, carrying just enough of the DOM surface for
/// container detection: selector hints plus vertical geometry.
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub id: ElementId,
    pub tag: String,
    pub classes: Vec<String>,
    pub role: Option<String>,
    /// Visible (client) height.
    pub height: f32,
    /// Full content (scroll) height.
    pub content_height: f32,
    pub scroll_top: f32,
    pub overflow_y: Overflow,
    /// When set, style reads on this element fail. Fault injection for the
    /// locator's per-candidate error tolerance.
    pub style_poisoned: bool,
}

impl ElementNode {
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn class_contains(&self, fragment: &str) -> bool {
        self.classes.iter().any(|c| c.contains(fragment))
    }
}

/// The scrollable region currently under control. Replaced wholesale on
/// re-detection, never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Viewport,
    Element(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// Rust rendition of the CSS probe strings the detector walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Tag(&'static str),
    Class(&'static str),
    Role(&'static str),
    ClassContains(&'static str),
}

impl Selector {
    fn matches(self, node: &ElementNode) -> bool {
        match self {
            Self::Tag(tag) => node.tag == tag,
            Self::Class(class) => node.has_class(class),
            Self::Role(role) => node.role.as_deref() == Some(role),
            Self::ClassContains(fragment) => node.class_contains(fragment),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub height: f32,
    pub content_height: f32,
    pub scroll_top: f32,
}

impl Viewport {
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Glide {
    target: ScrollTarget,
    dest: f32,
}

/// The whole host page: url, viewport, and elements in document order.
#[derive(Debug)]
pub struct PageModel {
    url: String,
    loading: bool,
    viewport: Viewport,
    elements: Vec<ElementNode>,
    next_id: u64,
    glide: Option<Glide>,
}

impl PageModel {
    pub fn new(url: impl Into<String>, viewport_height: f32, content_height: f32) -> Self {
        Self {
            url: url.into(),
            loading: false,
            viewport: Viewport {
                height: viewport_height,
                content_height,
                scroll_top: 0.0,
            },
            elements: Vec::new(),
            next_id: 1,
            glide: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub const fn loading(&self) -> bool {
        self.loading
    }

    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub const fn set_viewport_height(&mut self, height: f32) {
        self.viewport.height = height;
    }

    pub fn set_viewport_content_height(&mut self, content_height: f32) {
        self.viewport.content_height = content_height;
        self.clamp_offset(ScrollTarget::Viewport);
    }

    pub fn add_element(&mut self, node: ElementSpec) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(ElementNode {
            id,
            tag: node.tag.into(),
            classes: node.classes.iter().map(|&c| c.to_string()).collect(),
            role: node.role.map(str::to_string),
            height: node.height,
            content_height: node.content_height,
            scroll_top: 0.0,
            overflow_y: node.overflow_y,
            style_poisoned: false,
        });
        id
    }

    pub fn remove_element(&mut self, id: ElementId) {
        self.elements.retain(|n| n.id != id);
        if let Some(glide) = self.glide
            && glide.target == ScrollTarget::Element(id)
        {
            self.glide = None;
        }
    }

    pub fn elements(&self) -> &[ElementNode] {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementNode> {
        self.elements.iter().find(|n| n.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementNode> {
        self.elements.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// All elements matching `selector`, in document order.
    pub fn query(&self, selector: Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|n| selector.matches(n))
            .map(|n| n.id)
            .collect()
    }

    /// Computed overflow-y, failing like a DOM style read would on a
    /// poisoned or detached element.
    pub fn computed_overflow(&self, id: ElementId) -> Result<Overflow> {
        let Some(node) = self.element(id) else {
            bail!("element detached");
        };
        if node.style_poisoned {
            bail!("style read failed");
        }
        Ok(node.overflow_y)
    }

    pub fn scroll_top(&self, target: ScrollTarget) -> f32 {
        match target {
            ScrollTarget::Viewport => self.viewport.scroll_top,
            ScrollTarget::Element(id) => self.element(id).map_or(0.0, |n| n.scroll_top),
        }
    }

    fn target_max_scroll(&self, target: ScrollTarget) -> f32 {
        match target {
            ScrollTarget::Viewport => self.viewport.max_scroll(),
            ScrollTarget::Element(id) => self.element(id).map_or(0.0, ElementNode::max_scroll),
        }
    }

    fn set_offset(&mut self, target: ScrollTarget, offset: f32) {
        let max = self.target_max_scroll(target);
        let clamped = offset.clamp(0.0, max);
        match target {
            ScrollTarget::Viewport => self.viewport.scroll_top = clamped,
            ScrollTarget::Element(id) => {
                if let Some(node) = self.element_mut(id) {
                    node.scroll_top = clamped;
                }
            }
        }
    }

    fn clamp_offset(&mut self, target: ScrollTarget) {
        let current = self.scroll_top(target);
        self.set_offset(target, current);
    }

    /// Scroll `target` to an absolute offset, either instantly or as a glide
    /// advanced by [`Self::tick`].
    pub fn scroll_to(&mut self, target: ScrollTarget, offset: f32, behavior: ScrollBehavior) {
        let max = self.target_max_scroll(target);
        let dest = offset.clamp(0.0, max);
        match behavior {
            ScrollBehavior::Instant => {
                self.glide = None;
                self.set_offset(target, dest);
            }
            ScrollBehavior::Smooth => self.glide = Some(Glide { target, dest }),
        }
    }

    /// Immediate relative scroll. Cancels any glide in flight: the caller is
    /// driving position frame by frame.
    pub fn scroll_by(&mut self, target: ScrollTarget, delta: f32) {
        self.glide = None;
        let current = self.scroll_top(target);
        self.set_offset(target, current + delta);
    }

    /// Advance the smooth-scroll glide. Returns true when the offset moved
    /// this frame.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(glide) = self.glide else {
            return false;
        };
        let current = self.scroll_top(glide.target);
        let delta = glide.dest - current;
        if delta.abs() <= SMOOTH_SCROLL_SNAP_EPS {
            self.set_offset(glide.target, glide.dest);
            self.glide = None;
            return delta.abs() > f32::EPSILON;
        }
        let alpha = 1.0 - (1.0 - 0.90f32).powf(dt.min(0.1) / SMOOTH_SCROLL_RESPONSE);
        self.set_offset(glide.target, delta.mul_add(alpha, current));
        true
    }

    pub const fn gliding(&self) -> bool {
        self.glide.is_some()
    }
}

/// Construction-time description of an element; scroll state starts at zero.
#[derive(Debug, Clone, Copy)]
pub struct ElementSpec {
    pub tag: &'static str,
    pub classes: &'static [&'static str],
    pub role: Option<&'static str>,
    pub height: f32,
    pub content_height: f32,
    pub overflow_y: Overflow,
}

impl ElementSpec {
    pub const fn block(tag: &'static str, height: f32) -> Self {
        Self {
            tag,
            classes: &[],
            role: None,
            height,
            content_height: height,
            overflow_y: Overflow::Visible,
        }
    }

    pub const fn scrollable(
        tag: &'static str,
        classes: &'static [&'static str],
        height: f32,
        content_height: f32,
    ) -> Self {
        Self {
            tag,
            classes,
            role: None,
            height,
            content_height,
            overflow_y: Overflow::Auto,
        }
    }

    #[must_use]
    pub const fn with_role(mut self, role: &'static str) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub const fn with_classes(mut self, classes: &'static [&'static str]) -> Self {
        self.classes = classes;
        self
    }

    #[must_use]
    pub const fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow_y = overflow;
        self
    }
}
