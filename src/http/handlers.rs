//! HTTP handlers for the dashboard.
//!
//! Each handler reads the shared dataset and delegates to the
//! filter/aggregate engine; none of them can fail except on a malformed
//! query string.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};

use super::dto::{
    HealthResponse, PieResponse, PointDto, RangeQuery, ScatterResponse, SiteDto, SiteQuery,
    SitesResponse,
};
use super::error::AppError;
use super::page::{dashboard_page, DashboardView};
use super::state::AppState;
use crate::data::filter::{compute_pie_data, compute_scatter_data, pie_title, scatter_title};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Dashboard page
// =============================================================================

/// GET /?site=&low=&high=
///
/// The dashboard: site dropdown, payload range inputs, pie and scatter charts.
pub async fn dashboard(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let Query(query) = query?;
    let dataset = state.dataset.as_ref();
    let bounds = dataset.payload_bounds();
    let selector = query.selector();
    let range = query.range(bounds);

    let pie = compute_pie_data(dataset, &selector);
    let points = compute_scatter_data(dataset, &selector, range);
    log::debug!(
        "dashboard site={selector} range=[{}, {}] -> {} slices, {} points",
        range.low,
        range.high,
        pie.len(),
        points.len()
    );

    let pie_title = pie_title(&selector);
    let scatter_title = scatter_title(&selector);
    let view = DashboardView {
        title: &state.title,
        sites: dataset.sites(),
        selector: &selector,
        range,
        bounds,
        pie: &pie,
        pie_title: &pie_title,
        points: &points,
        scatter_title: &scatter_title,
        colors: &state.booster_colors,
    };
    Ok(Html(dashboard_page(&view)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        records: state.dataset.len(),
    })
}

// =============================================================================
// Chart data
// =============================================================================

/// GET /api/sites
///
/// Dropdown options and the payload bounds for the range control.
pub async fn list_sites(State(state): State<AppState>) -> Json<SitesResponse> {
    Json(SitesResponse {
        sites: state.dataset.sites().iter().map(|s| SiteDto::new(s)).collect(),
        payload_bounds: state.dataset.payload_bounds(),
    })
}

/// GET /api/pie?site=
pub async fn get_pie(
    State(state): State<AppState>,
    query: Result<Query<SiteQuery>, QueryRejection>,
) -> HandlerResult<PieResponse> {
    let Query(query) = query?;
    let selector = query.selector();
    let slices = compute_pie_data(&state.dataset, &selector);

    Ok(Json(PieResponse {
        site: selector.to_string(),
        title: pie_title(&selector),
        total: slices.total(),
        slices,
    }))
}

/// GET /api/scatter?site=&low=&high=
pub async fn get_scatter(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> HandlerResult<ScatterResponse> {
    let Query(query) = query?;
    let selector = query.selector();
    let range = query.range(state.dataset.payload_bounds());
    let points = compute_scatter_data(&state.dataset, &selector, range);

    Ok(Json(ScatterResponse {
        site: selector.to_string(),
        title: scatter_title(&selector),
        range,
        points: points.into_iter().map(PointDto::from).collect(),
    }))
}
