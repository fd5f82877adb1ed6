use serde::Serialize;

use super::model::{LaunchDataset, Outcome, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Derived tables
// ---------------------------------------------------------------------------

/// One category of the pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

/// Category → count, in order of first occurrence in the source scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregateTable {
    slices: Vec<PieSlice>,
}

impl AggregateTable {
    /// Add `amount` to `label`, appending the category on first sight.
    fn bump(&mut self, label: &str, amount: usize) {
        match self.slices.iter_mut().find(|s| s.label == label) {
            Some(slice) => slice.count += amount,
            None => self.slices.push(PieSlice {
                label: label.to_string(),
                count: amount,
            }),
        }
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.count)
    }

    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// One marker of the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
    pub launch_site: String,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Pie chart input for the selected site.
///
/// * `All` → successful launches per site. Every site is listed, including
///   sites without a single success.
/// * a specific site → `Success` / `Failure` counts for that site. An unknown
///   site yields an empty table.
pub fn compute_pie_data(dataset: &LaunchDataset, selector: &SiteSelector) -> AggregateTable {
    let mut table = AggregateTable::default();

    for rec in dataset.records() {
        match selector {
            SiteSelector::All => {
                table.bump(&rec.launch_site, usize::from(rec.outcome.is_success()));
            }
            SiteSelector::Site(site) if *site == rec.launch_site => {
                table.bump(rec.outcome.label(), 1);
            }
            SiteSelector::Site(_) => {}
        }
    }

    table
}

/// Scatter chart input: launches whose payload lies in the closed `range`
/// and, unless `All`, at the selected site. Source order is kept.
///
/// A malformed range (`low > high`, or a NaN or infinite bound) matches nothing.
pub fn compute_scatter_data(
    dataset: &LaunchDataset,
    selector: &SiteSelector,
    range: PayloadRange,
) -> Vec<ScatterPoint> {
    if !range.is_valid() {
        log::debug!("ignoring malformed payload range {range:?}");
        return Vec::new();
    }

    dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg) && selector.matches(&rec.launch_site))
        .map(|rec| ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
            launch_site: rec.launch_site.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart titles
// ---------------------------------------------------------------------------

pub fn pie_title(selector: &SiteSelector) -> String {
    match selector {
        SiteSelector::All => "Total successful launches by site".to_string(),
        SiteSelector::Site(site) => format!("Total successful launches for site {site}"),
    }
}

pub fn scatter_title(selector: &SiteSelector) -> String {
    match selector {
        SiteSelector::All => "Payload vs. launch outcome for all sites".to_string(),
        SiteSelector::Site(site) => format!("Payload vs. launch outcome for site {site}"),
    }
}
