// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

mod helpers;

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use frame_viewer::ViewerConfig;
use frame_viewer::server::router;
use helpers::{cars, settings, write_bytes, write_table, write_value};
use tower::ServiceExt;

fn config_for(path: PathBuf) -> ViewerConfig {
    ViewerConfig::default().with_overrides(Some(path), None, Some("Cars".to_string()))
}

async fn get(config: ViewerConfig, uri: &str) -> (StatusCode, String) {
    let response = router(config)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(ViewerConfig::default(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_index_renders_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(dir.path(), "cars.pkl", cars());

    let (status, body) = get(config_for(path), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Cars</title>"));
    assert!(body.contains("<thead><tr><th>speed</th><th>weight</th></tr></thead>"));
    assert!(body.contains("<tr><td>30</td><td>1200</td></tr>"));
    assert!(body.contains("<h3>Descriptive Statistics</h3>"));
    assert!(body.contains("<tr><td>speed</td><td>Int64</td></tr>"));
}

#[tokio::test]
async fn test_index_missing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dcision_tree.pkl");

    let (status, body) = get(config_for(path), "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<div class=\"error\">Error: The file"));
    assert!(!body.contains("<table>"));
}

#[tokio::test]
async fn test_index_corrupt_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bytes(dir.path(), "dcision_tree.pkl", b"garbage");

    let (status, body) = get(config_for(path), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("An error occurred while loading the artifact"));
}

#[tokio::test]
async fn test_page_api_non_tabular() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_value(dir.path(), "model.pkl", settings());

    let (status, body) = get(config_for(path), "/api/page").await;
    assert_eq!(status, StatusCode::OK);

    let page: serde_json::Value = serde_json::from_str(&body).unwrap();
    let blocks = page["blocks"].as_array().unwrap();
    assert_eq!(blocks[0]["kind"], "title");
    assert_eq!(blocks[1]["kind"], "divider");
    assert_eq!(blocks[2]["kind"], "warning");
    assert_eq!(blocks[3]["kind"], "code");
    assert_eq!(blocks[3]["value"], "mapping");
}

#[tokio::test]
async fn test_each_request_reloads_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(dir.path(), "cars.pkl", cars());
    let config = config_for(path.clone());

    let (_, first) = get(config.clone(), "/").await;
    let (_, second) = get(config.clone(), "/").await;
    assert_eq!(first, second);

    std::fs::remove_file(&path).unwrap();
    let (status, _) = get(config, "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
