// ABOUTME: HTTP tests for the health endpoint
// ABOUTME: Validates the status envelope and the configured-services report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::router_with_config;
use nutrition_api_server::config::ServerConfig;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_ok() {
    let body: Value = AxumTestRequest::get("/api/health")
        .send(router_with_config(ServerConfig::default()))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Server is running");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_health_reports_configured_services() {
    let mut config = ServerConfig::default();
    config.gemini.api_key = Some("gemini-secret".to_owned());
    config.spoonacular.api_key = Some("spoonacular-secret".to_owned());

    let response = AxumTestRequest::get("/api/health")
        .send(router_with_config(config))
        .await;
    let text = response.text();
    assert!(!text.contains("secret"));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["services"]["gemini"], true);
    assert_eq!(body["services"]["usda"], false);
    assert_eq!(body["services"]["spoonacular"], true);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let body: Value = AxumTestRequest::get("/api/unknown")
        .send(router_with_config(ServerConfig::default()))
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["error"], "Route not found");
}
