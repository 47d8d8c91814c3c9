//! UI construction: toolbar, page view, settings panel, status bar, and the
//! floating controls overlay.

mod overlay;
mod page_view;
mod settings;
mod top;
