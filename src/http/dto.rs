//! Request and response types for the HTTP API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::data::filter::{AggregateTable, ScatterPoint};
use crate::data::model::{site_label, PayloadRange, SiteSelector};

// =============================================================================
// Queries
// =============================================================================

/// `?site=`: missing or `ALL` selects every site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteQuery {
    pub site: Option<String>,
}

impl SiteQuery {
    pub fn selector(&self) -> SiteSelector {
        self.site
            .as_deref()
            .map(SiteSelector::parse)
            .unwrap_or_default()
    }
}

/// `?site=&low=&high=`: missing bounds fall back to the dataset bounds.
/// A cleared form field (`low=`) counts as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    pub site: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub low: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub high: Option<f64>,
}

/// Empty or whitespace-only text is `None`; anything else must parse as a number.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<f64>().map(Some).map_err(|e| {
            serde::de::Error::custom(format!("cannot parse {text:?} as a number: {e}"))
        }),
    }
}

impl RangeQuery {
    pub fn selector(&self) -> SiteSelector {
        self.site
            .as_deref()
            .map(SiteSelector::parse)
            .unwrap_or_default()
    }

    pub fn range(&self, bounds: PayloadRange) -> PayloadRange {
        PayloadRange::new(
            self.low.unwrap_or(bounds.low),
            self.high.unwrap_or(bounds.high),
        )
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDto {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SiteDto {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            label: site_label(code).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SitesResponse {
    pub sites: Vec<SiteDto>,
    pub payload_bounds: PayloadRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieResponse {
    pub site: String,
    pub title: String,
    pub slices: AggregateTable,
    pub total: usize,
}

/// A scatter point with the outcome as its 0/1 flag, the way it is plotted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointDto {
    pub payload_mass_kg: f64,
    pub class: u8,
    pub booster_version_category: String,
    pub launch_site: String,
}

impl From<ScatterPoint> for PointDto {
    fn from(p: ScatterPoint) -> Self {
        Self {
            payload_mass_kg: p.payload_mass_kg,
            class: p.outcome.flag(),
            booster_version_category: p.booster_version_category,
            launch_site: p.launch_site,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterResponse {
    pub site: String,
    pub title: String,
    pub range: PayloadRange,
    pub points: Vec<PointDto>,
}
