//! Launch dashboard HTTP server.
//!
//! Loads the launch table once, then serves the dashboard page and the chart
//! JSON endpoints on a local port.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin launch-dash-server
//! ```
//!
//! Settings come from `launch-dash.toml` in the working directory if present
//! (`data_path`, `host`, `port`, `title`); log verbosity from `RUST_LOG`
//! (default: info).

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use launch_dash::config::{DashboardConfig, CONFIG_FILE};
use launch_dash::data::loader;
use launch_dash::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; library `log` records are bridged into tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting launch dashboard");

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("loading dashboard configuration")?;

    // The dataset is loaded exactly once; without it there is nothing to serve.
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading launch data from {}", config.data_path.display()))?;
    let state = AppState::new(Arc::new(dataset), &config.title);

    let app = create_router(state);

    let addr = config.bind_addr()?;
    info!("Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
