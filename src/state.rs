use std::sync::Arc;

use launch_dash::color::ColorMap;
use launch_dash::data::filter::{
    compute_pie_data, compute_scatter_data, pie_title, scatter_title, AggregateTable, ScatterPoint,
};
use launch_dash::data::model::{LaunchDataset, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Launch table, loaded before the window opens. Never mutated.
    pub dataset: Arc<LaunchDataset>,

    /// Dropdown value.
    pub site: SiteSelector,

    /// Slider values.
    pub payload_range: PayloadRange,

    /// Pie chart input for `site` (cached).
    pub pie: AggregateTable,
    pub pie_title: String,

    /// Scatter chart input for `site` and `payload_range` (cached).
    pub points: Vec<ScatterPoint>,
    pub scatter_title: String,

    /// Booster category colours for the scatter chart.
    pub booster_colors: ColorMap,

    /// Whether the table of scatter points is shown under the charts.
    pub show_points: bool,
}

impl AppState {
    /// Start on "All Sites" with the full payload range.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let booster_colors = ColorMap::new(&dataset.booster_categories());
        let payload_range = dataset.payload_bounds();
        let mut state = Self {
            dataset,
            site: SiteSelector::All,
            payload_range,
            pie: AggregateTable::default(),
            pie_title: String::new(),
            points: Vec::new(),
            scatter_title: String::new(),
            booster_colors,
            show_points: false,
        };
        state.recompute_pie();
        state.recompute_scatter();
        state
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn set_site(&mut self, site: SiteSelector) {
        if self.site == site {
            return;
        }
        log::debug!("site selected: {site}");
        self.site = site;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Slider changed: only the scatter chart depends on the range.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.payload_range == range {
            return;
        }
        self.payload_range = range;
        self.recompute_scatter();
    }

    /// Back to the dataset's full payload range.
    pub fn reset_payload_range(&mut self) {
        self.set_payload_range(self.dataset.payload_bounds());
    }

    fn recompute_pie(&mut self) {
        self.pie = compute_pie_data(&self.dataset, &self.site);
        self.pie_title = pie_title(&self.site);
    }

    fn recompute_scatter(&mut self) {
        self.points = compute_scatter_data(&self.dataset, &self.site, self.payload_range);
        self.scatter_title = scatter_title(&self.site);
    }
}
