// ABOUTME: Google Gemini LLM provider implementation over the Generative Language REST API
// ABOUTME: Sends a single non-streamed generateContent call and extracts the first text part
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `GEMINI_MODEL` and `GEMINI_API_BASE_URL` override the
//! model and endpoint.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutrition_api_server::config::GeminiConfig;
//! use nutrition_api_server::llm::{CompletionRequest, GeminiProvider, LlmProvider};
//! use nutrition_api_server::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = GeminiConfig {
//!         api_key: Some("your-api-key".to_owned()),
//!         ..GeminiConfig::default()
//!     };
//!     if let Some(provider) = GeminiProvider::from_config(&config) {
//!         let request = CompletionRequest::new("Is oatmeal a good breakfast?");
//!         let response = provider.complete(&request).await?;
//!         println!("{}", response.content);
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{CompletionRequest, CompletionResponse, LlmProvider, TokenUsage};
use crate::config::GeminiConfig;
use crate::constants::{defaults, service_names};
use crate::errors::{AppError, ErrorCode};

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Part of content; only text parts are produced or consumed here
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// Usage metadata from Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            model: defaults::GEMINI_MODEL.to_owned(),
            base_url: defaults::GEMINI_API_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from server configuration
    ///
    /// Returns `None` when no API key is configured.
    #[must_use]
    pub fn from_config(config: &GeminiConfig) -> Option<Self> {
        config.api_key.as_ref().map(|api_key| {
            Self::new(api_key.clone())
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
        })
    }

    /// Use a different model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the provider at a different endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Wrap the prompt as the single user turn of a Gemini request
    fn build_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
        }
    }

    /// Extract text content from Gemini response
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.text.clone()))
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ExternalServiceError,
                    "No content in Gemini response",
                )
            })
    }

    /// Convert usage metadata to our token usage format
    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to appropriate error type
    ///
    /// Rate limit (429) responses keep Gemini's retry hint in a readable form.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            _ => AppError::new(
                ErrorCode::ExternalServiceError,
                format!("Gemini API error ({status}): {message}"),
            ),
        }
    }

    /// Extract a user-friendly quota/rate limit message from Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Example: "Please retry in 6.406453963s."
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        service_names::GEMINI
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, AppError> {
        let url = self.build_url(&self.model, "generateContent");

        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceError,
                    format!("HTTP request failed: {}", e.without_url()),
                )
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::new(
                ErrorCode::ExternalServiceError,
                format!("Failed to read response: {}", e.without_url()),
            )
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::new(
                    ErrorCode::ExternalServiceError,
                    format!("Failed to parse Gemini response: {e}"),
                )
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::new(
                ErrorCode::ExternalServiceError,
                format!("Gemini API error: {}", error.message),
            ));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!("Successfully received Gemini response");

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            usage,
            finish_reason,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_puts_prompt_in_single_user_content() {
        let request = CompletionRequest::new("Analyze this");
        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Analyze this" }] }]
            })
        );
    }

    #[test]
    fn test_extract_content_takes_first_text_part() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Eat more protein."}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiProvider::extract_content(&response).unwrap(),
            "Eat more protein."
        );
    }

    #[test]
    fn test_extract_content_without_candidates_fails() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        let error = GeminiProvider::extract_content(&response).unwrap_err();
        assert_eq!(error.message, "No content in Gemini response");
    }

    #[test]
    fn test_map_api_error_uses_gemini_message() {
        let error = GeminiProvider::map_api_error(
            400,
            r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key."}}"#,
        );
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
        assert_eq!(
            error.message,
            "Gemini API error (400): API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn test_quota_message_rounds_retry_delay_up() {
        let error = GeminiProvider::map_api_error(
            429,
            r#"{"error":{"message":"Quota exceeded. Please retry in 6.406453963s."}}"#,
        );
        assert_eq!(error.code, ErrorCode::ExternalRateLimited);
        assert_eq!(
            error.message,
            "AI service quota exceeded. Please try again in 7 seconds."
        );
        assert_eq!(
            GeminiProvider::extract_quota_message("Resource exhausted"),
            "AI service quota exceeded. Please wait a moment and try again."
        );
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(GeminiProvider::from_config(&GeminiConfig::default()).is_none());

        let config = GeminiConfig {
            api_key: Some("key".to_owned()),
            model: "gemini-1.5-flash".to_owned(),
            base_url: "http://localhost:9999/".to_owned(),
        };
        let provider = GeminiProvider::from_config(&config).unwrap();
        assert_eq!(provider.model, "gemini-1.5-flash");
        assert_eq!(
            provider.build_url("gemini-1.5-flash", "generateContent"),
            "http://localhost:9999/models/gemini-1.5-flash:generateContent"
        );
    }
}
