//! Application state for the HTTP server.

use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::model::LaunchDataset;

/// Shared application state passed to all handlers.
///
/// Everything in here is immutable after startup, so handlers on any worker
/// thread read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<LaunchDataset>,
    /// Booster category colours for the scatter chart, fixed at load time.
    pub booster_colors: Arc<ColorMap>,
    /// Page heading.
    pub title: Arc<str>,
}

impl AppState {
    pub fn new(dataset: Arc<LaunchDataset>, title: &str) -> Self {
        let booster_colors = Arc::new(ColorMap::new(&dataset.booster_categories()));
        Self {
            dataset,
            booster_colors,
            title: Arc::from(title),
        }
    }
}
