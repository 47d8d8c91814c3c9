mod app;
mod buttons;
mod config;
mod locator;
mod machine;
mod metrics;
mod page;
mod supervisor;

use app::ScrollmateApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scrollmate=info")),
        )
        .init();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Scrollmate — Scroll Controls",
        native_options,
        Box::new(|_cc| Ok(Box::new(ScrollmateApp::new()))),
    )
}
