#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use launch_dash::data::model::{LaunchDataset, LaunchRecord, Outcome};
use launch_dash::http::{create_router, AppState};

fn router() -> Router {
    let dataset = LaunchDataset::from_records(vec![
        LaunchRecord::new("A", 500.0, Outcome::Success, "v1.0"),
        LaunchRecord::new("A", 1500.0, Outcome::Failure, "v1.1"),
        LaunchRecord::new("B", 800.0, Outcome::Success, "FT"),
        LaunchRecord::new("C", 2000.0, Outcome::Failure, "FT"),
    ])
    .unwrap();
    create_router(AppState::new(Arc::new(dataset), "Launch Records"))
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn health_reports_record_count() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"], 4);
}

#[tokio::test]
async fn sites_come_with_bounds() {
    let (_, body) = get_json("/api/sites").await;
    let codes: Vec<&str> = body["sites"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["A", "B", "C"]);
    assert_eq!(body["payload_bounds"]["low"], 500.0);
    assert_eq!(body["payload_bounds"]["high"], 2000.0);
}

#[tokio::test]
async fn pie_for_all_sites_keeps_zero_rows() {
    let (status, body) = get_json("/api/pie?site=ALL").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["site"], "ALL");
    assert_eq!(body["total"], 2);
    let slices = body["slices"].as_array().unwrap();
    assert_eq!(slices.len(), 3);
    assert_eq!(slices[2]["label"], "C");
    assert_eq!(slices[2]["count"], 0);
}

#[tokio::test]
async fn pie_for_one_site_splits_outcomes() {
    let (_, body) = get_json("/api/pie?site=A").await;
    assert_eq!(body["slices"][0]["label"], "Success");
    assert_eq!(body["slices"][1]["label"], "Failure");
    assert_eq!(body["title"], "Total successful launches for site A");
}

#[tokio::test]
async fn pie_for_unknown_site_is_empty() {
    let (status, body) = get_json("/api/pie?site=Nowhere").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slices"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn scatter_filters_by_range_and_site() {
    let (_, body) = get_json("/api/scatter?site=ALL&low=0&high=1000").await;
    let payloads: Vec<f64> = body["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["payload_mass_kg"].as_f64().unwrap())
        .collect();
    assert_eq!(payloads, vec![500.0, 800.0]);
    assert_eq!(body["points"][0]["class"], 1);

    let (_, body) = get_json("/api/scatter?site=A").await;
    assert_eq!(body["points"].as_array().unwrap().len(), 2);
    assert_eq!(body["range"]["high"], 2000.0);
}

#[tokio::test]
async fn scatter_with_reversed_range_is_empty() {
    let (status, body) = get_json("/api/scatter?low=1000&high=0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_bound_is_a_bad_request() {
    let (status, body) = get_json("/api/scatter?low=heavy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn cleared_bound_falls_back_to_dataset_bounds() {
    let (status, html) = get("/?site=ALL&low=&high=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("<svg").count(), 2);

    let (status, body) = get_json("/api/scatter?low=%20&high=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["range"]["low"], 500.0);
    assert_eq!(body["points"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unbounded_range_is_empty_and_draws_finite_chart() {
    let (status, html) = get("/?site=ALL&low=-inf&high=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("NaN"));
    assert!(html.contains("No data"));

    let (status, body) = get_json("/api/scatter?low=-inf&high=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_page_renders_both_charts() {
    let (status, html) = get("/?site=B&low=0&high=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Launch Records</h1>"));
    assert!(html.contains(r#"<option value="B" selected>B</option>"#));
    assert!(html.contains("Total successful launches for site B"));
    assert!(html.contains("Payload vs. launch outcome for site B"));
    assert_eq!(html.matches("<svg").count(), 2);
}
