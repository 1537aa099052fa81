//! COVID-19 EDA - Impact of COVID-19 in Sub-Saharan Africa
//!
//! Native dashboard entry point.

use anyhow::Context;
use covid_eda::config::{DashboardConfig, CONFIG_FILE_NAME, PAGE_ICON, PAGE_TITLE};
use covid_eda::gui::DashboardApp;
use eframe::egui;
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> anyhow::Result<DashboardConfig> {
    DashboardConfig::load_or_default(Path::new(CONFIG_FILE_NAME))
        .with_context(|| format!("loading {}", CONFIG_FILE_NAME))
}

fn main() -> eframe::Result<()> {
    init_logging();

    let config = load_config().unwrap_or_else(|e| {
        warn!("{:#}, using defaults", e);
        DashboardConfig::default()
    });

    let title = format!("{} {}", PAGE_ICON, PAGE_TITLE);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title(&title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
