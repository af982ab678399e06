mod admin;
mod app;
mod color;
mod config;
mod data;
mod session;
mod state;
mod ui;
mod widgets;

use std::path::Path;

use app::MarketDarpanApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Market Darpan – Audit Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(MarketDarpanApp::new(config)))),
    )
}
