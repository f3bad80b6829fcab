use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use dataset::Dataset;
use http_body_util::BodyExt;
use serde_json::Value;
use server::{config::AppConfig, http::{AppState, build_router}};
use tower::ServiceExt;

const FIXTURE_CSV: &str = "\
employee_id,department,region,education,gender,recruitment_channel,age,date_of_birth,join_date,length_of_service,KPIs_met >80%,awards_won?,is_promoted
1,Sales,region_7,Bachelor's,f,sourcing,30,1994-03-10,2019-05-01,5,1,0,1
2,Sales,region_7,Bachelor's,m,other,41,1983-07-22,2020-09-14,2,0,0,0
3,Technology,region_2,Master's & above,f,referred,28,1996-01-05,2020-09-14,3,1,1,1
4,Technology,region_2,Bachelor's,m,sourcing,35,1989-11-30,2020-11-02,7,1,0,0
5,Technology,region_4,Bachelor's,m,sourcing,52,1972-06-18,2018-01-20,11,0,0,1
6,Sales,region_4,Below Secondary,f,other,24,2000-02-29,2021-02-15,1,0,0,0
";

fn test_router() -> Router {
    let dataset = Dataset::from_csv_reader(FIXTURE_CSV.as_bytes()).unwrap();
    let config = Arc::new(AppConfig {
        dataset_path: PathBuf::from("fixture.csv"),
        dashboard_title: "Promotion Dashboard".to_string(),
        cors_allowed_origins: Vec::new(),
    });
    build_router(AppState::new(dataset, config))
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

#[tokio::test]
async fn health_reports_dataset_rows() {
    let router = test_router();
    let (status, body) = get_json(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["dataset_rows"], 6);
}

#[tokio::test]
async fn summary_matches_the_fixture() {
    let router = test_router();
    let (status, body) = get_json(&router, "/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Promotion Dashboard");
    assert_eq!(body["total_employees"], 6);
    assert_eq!(body["promoted"], 3);
    assert_eq!(body["kpi_met"], 3);
    // Ages sum to 210; mean exactly 35.
    assert_eq!(body["average_age"], 35);
}

#[tokio::test]
async fn categories_lists_seven_options() {
    let router = test_router();
    let (status, body) = get_json(&router, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    let options = body.as_array().unwrap();
    assert_eq!(options.len(), 7);
    assert!(options.iter().any(|o| o["value"] == "department"));
    assert!(options.iter().any(|o| o["label"] == "Recruitment Channel"));
}

#[tokio::test]
async fn promotion_rate_fractions_sum_to_one() {
    let router = test_router();
    let (status, body) = get_json(&router, "/api/charts/promotion-rate?category=department").await;
    assert_eq!(status, StatusCode::OK);
    let percentages: Vec<f64> = body["data"][0]["y"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    let sum: f64 = percentages.iter().sum();
    assert!((sum - 1.0).abs() <= 0.01, "fractions sum to {sum}");
    for pair in percentages.windows(2) {
        assert!(pair[0] >= pair[1], "rows not sorted descending");
    }
}

#[tokio::test]
async fn promotion_rate_is_idempotent() {
    let router = test_router();
    let (_, first) = get_json(&router, "/api/charts/promotion-rate?category=gender").await;
    let (_, second) = get_json(&router, "/api/charts/promotion-rate?category=gender").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn promotion_rate_rejects_unknown_category() {
    let router = test_router();
    let (status, _) = get_json(&router, "/api/charts/promotion-rate?category=salary").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn static_charts_are_served() {
    let router = test_router();
    let (status, growth) = get_json(&router, "/api/charts/employee-growth").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(growth["data"][0]["type"], "scatter");

    let (status, distribution) = get_json(&router, "/api/charts/service-distribution").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(distribution["data"][0]["type"], "box");
    assert_eq!(distribution["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn index_serves_the_dashboard_page() {
    let router = test_router();
    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8_lossy(&bytes);
    assert!(page.contains("category-select"));
}
