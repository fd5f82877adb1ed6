use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::DatasetError;

// ---------------------------------------------------------------------------
// Column names bound at load time
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Every column a launch file must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

/// Facility names for the launch sites found in the SpaceX records.
const KNOWN_SITES: [(&str, &str); 4] = [
    ("CCAFS LC-40", "Cape Canaveral Launch Complex 40 (CCAFS LC-40)"),
    ("CCAFS SLC-40", "Cape Canaveral Space Launch Complex 40 (CCAFS SLC-40)"),
    ("KSC LC-39A", "Kennedy Space Center Launch Complex 39A (KSC LC-39A)"),
    ("VAFB SLC-4E", "Vandenberg Air Force Base Space Launch Complex (VAFB SLC-4E)"),
];

/// Human readable facility name for a site code, if it is a known one.
pub fn site_label(code: &str) -> Option<&'static str> {
    KNOWN_SITES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Stored as `class` = 1 (success) / 0 (failure) in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn flag(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Non-negative, finite.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Only used to colour the scatter chart.
    pub booster_version_category: String,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteSelector / PayloadRange – per-request inputs
// ---------------------------------------------------------------------------

/// Which launch site a chart is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Sentinel used by the dropdown and the query string for "every site".
    /// Reserved: the loader rejects a launch site with this code.
    pub const ALL: &'static str = "ALL";

    /// Parse a dropdown / query value. Empty input means every site.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == Self::ALL {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteSelector::All => Self::ALL,
            SiteSelector::Site(site) => site,
        }
    }

    /// Whether a record at `site` passes this selector.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `[low, high]` payload window in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// A range is usable when both bounds are finite and `low <= high`.
    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }

    /// Closed-interval membership; always false for an invalid range.
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full launch table. Built once at startup and never mutated; share it
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    payload_bounds: PayloadRange,
}

impl LaunchDataset {
    /// Build the dataset and its site index. An empty table has no payload
    /// bounds and is rejected.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        let first = records.first().ok_or(DatasetError::Empty)?;
        let mut bounds = PayloadRange::new(first.payload_mass_kg, first.payload_mass_kg);
        let mut sites: Vec<String> = Vec::new();

        for rec in &records {
            bounds.low = bounds.low.min(rec.payload_mass_kg);
            bounds.high = bounds.high.max(rec.payload_mass_kg);
            if !sites.iter().any(|s| *s == rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
        }

        Ok(LaunchDataset {
            records,
            sites,
            payload_bounds: bounds,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Observed `(min, max)` payload mass, computed at load time.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    /// Sorted set of booster categories, used to build the colour legend.
    pub fn booster_categories(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|r| r.booster_version_category.clone())
            .collect()
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a dataset built through `from_records`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("B", 800.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("B", 9600.0, Outcome::Failure, "B5"),
            LaunchRecord::new("A", 0.0, Outcome::Failure, "v1.0"),
        ])
        .unwrap()
    }

    #[test]
    fn bounds_cover_all_payloads() {
        let ds = sample();
        assert_eq!(ds.payload_bounds(), PayloadRange::new(0.0, 9600.0));
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn sites_keep_first_occurrence_order() {
        let ds = sample();
        assert_eq!(ds.sites(), ["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn booster_categories_are_sorted_and_unique() {
        let cats: Vec<String> = sample().booster_categories().into_iter().collect();
        assert_eq!(cats, vec!["B5", "FT", "v1.0", "v1.1"]);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = LaunchDataset::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn selector_parses_all_sentinel() {
        assert_eq!(SiteSelector::parse("ALL"), SiteSelector::All);
        assert_eq!(SiteSelector::parse(""), SiteSelector::All);
        assert_eq!(
            SiteSelector::parse(" KSC LC-39A "),
            SiteSelector::Site("KSC LC-39A".to_string())
        );
        assert!(SiteSelector::All.matches("anything"));
        assert!(!SiteSelector::Site("A".into()).matches("B"));
    }

    #[test]
    fn range_is_closed_on_both_ends() {
        let r = PayloadRange::new(500.0, 1000.0);
        assert!(r.contains(500.0));
        assert!(r.contains(1000.0));
        assert!(!r.contains(1000.5));
        assert!(!PayloadRange::new(10.0, 1.0).is_valid());
        assert!(!PayloadRange::new(f64::NAN, 1.0).is_valid());
        assert!(!PayloadRange::new(f64::NEG_INFINITY, 1.0).is_valid());
        assert!(!PayloadRange::new(0.0, f64::INFINITY).is_valid());
        assert!(!PayloadRange::new(f64::NAN, 1.0).contains(0.5));
    }

    #[test]
    fn known_sites_have_labels() {
        assert_eq!(
            site_label("KSC LC-39A"),
            Some("Kennedy Space Center Launch Complex 39A (KSC LC-39A)")
        );
        assert_eq!(site_label("Boca Chica"), None);
        assert_eq!(Outcome::from_flag(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_flag(2), None);
    }
}
