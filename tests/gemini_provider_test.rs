// ABOUTME: Wire-level tests for the Gemini provider against a local stub server
// ABOUTME: Verifies URL shape, key placement, request body and error status mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::router_with_provider;
use helpers::stub_upstream::StubUpstream;
use nutrition_api_server::errors::ErrorCode;
use nutrition_api_server::llm::{CompletionRequest, GeminiProvider, LlmProvider};
use serde_json::{json, Value};

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 40, "totalTokenCount": 160}
    })
}

fn provider_for(upstream: &StubUpstream) -> GeminiProvider {
    GeminiProvider::new("gemini-test-key").with_base_url(format!("{}/", upstream.base_url))
}

#[tokio::test]
async fn test_complete_sends_prompt_and_key() {
    let upstream = StubUpstream::spawn(StatusCode::OK, gemini_reply("Drink more water.")).await;
    let provider = provider_for(&upstream).with_model("gemini-2.5-flash");

    let response = provider
        .complete(&CompletionRequest::new("Analyze my day"))
        .await
        .unwrap();

    assert_eq!(response.content, "Drink more water.");
    assert_eq!(response.model, "gemini-2.5-flash");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage.unwrap().total_tokens, 160);

    let request = upstream.single_request();
    assert_eq!(request.path, "/models/gemini-2.5-flash:generateContent");
    assert_eq!(request.query["key"], "gemini-test-key");
    let body = request.body.unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Analyze my day");
    assert_eq!(body["contents"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_configured_model_selects_endpoint() {
    let upstream = StubUpstream::spawn(StatusCode::OK, gemini_reply("ok")).await;
    let provider = provider_for(&upstream).with_model("gemini-pro");

    let response = provider
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap();

    assert_eq!(response.model, "gemini-pro");
    assert_eq!(
        upstream.single_request().path,
        "/models/gemini-pro:generateContent"
    );
}

#[tokio::test]
async fn test_error_status_uses_api_message() {
    let upstream = StubUpstream::spawn(
        StatusCode::BAD_REQUEST,
        json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}),
    )
    .await;

    let error = provider_for(&upstream)
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(error.message, "Gemini API error (400): API key not valid");
    assert!(!error.message.contains("gemini-test-key"));
}

#[tokio::test]
async fn test_rate_limit_is_reported_as_quota() {
    let upstream = StubUpstream::spawn(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"code": 429, "message": "Quota exceeded. Please retry in 6.4s."}}),
    )
    .await;

    let error = provider_for(&upstream)
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalRateLimited);
    assert_eq!(
        error.message,
        "AI service quota exceeded. Please try again in 7 seconds."
    );
}

#[tokio::test]
async fn test_empty_candidates_is_an_error() {
    let upstream = StubUpstream::spawn(StatusCode::OK, json!({"candidates": []})).await;

    let error = provider_for(&upstream)
        .complete(&CompletionRequest::new("hi"))
        .await
        .unwrap_err();

    assert_eq!(error.message, "No content in Gemini response");
}

#[tokio::test]
async fn test_recommendation_endpoint_end_to_end() {
    let upstream =
        StubUpstream::spawn(StatusCode::OK, gemini_reply("Add a vegetable to dinner.")).await;
    let provider: Arc<dyn LlmProvider> = Arc::new(provider_for(&upstream));

    let body: Value = AxumTestRequest::post("/api/recommendation")
        .json(&json!({"summary": {"items": [{"name": "Apple"}], "totals": {"calories": 95}}}))
        .send(router_with_provider(Some(provider)))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        body,
        json!({"recommendation": "Add a vegetable to dinner.", "success": true})
    );
    let sent = upstream.single_request().body.unwrap();
    assert!(sent["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with(r#"User ate these items this week: [{"name":"Apple"}]."#));
}

#[tokio::test]
async fn test_recommendation_endpoint_relays_upstream_failure() {
    let upstream = StubUpstream::spawn(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"message": "The model is overloaded."}}),
    )
    .await;
    let provider: Arc<dyn LlmProvider> = Arc::new(provider_for(&upstream));

    let body: Value = AxumTestRequest::post("/api/recommendation")
        .json(&json!({"summary": {"items": []}}))
        .send(router_with_provider(Some(provider)))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .json();

    assert_eq!(body["error"], "Failed to generate recommendation");
    assert_eq!(
        body["message"],
        "Gemini API error (503): The model is overloaded."
    );
    assert_eq!(body["debug"]["errorType"], "upstream");
    assert_eq!(upstream.requests().len(), 1);
}
