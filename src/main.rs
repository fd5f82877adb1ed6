mod app;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use app::LaunchDashApp;
use eframe::egui;
use launch_dash::config::{DashboardConfig, CONFIG_FILE};
use launch_dash::data::loader;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("loading dashboard configuration")?;

    // Loaded once, before the window exists; a bad file aborts startup.
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading launch data from {}", config.data_path.display()))?;
    let app = LaunchDashApp::new(Arc::new(dataset), config.title.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
