// ABOUTME: Recommendation dispatcher that sends a rendered prompt to the configured LLM provider
// ABOUTME: Maps missing configuration and provider failures to typed dispatch errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # Recommendation Dispatcher
//!
//! One prompt in, one backend call out, one text back. The dispatcher holds
//! an optional provider handle supplied at construction; when it is `None`
//! every dispatch fails with [`DispatchError::Configuration`] without
//! touching the network. Provider failures are reported with the provider's
//! message unchanged. There are no retries and no extra timeout.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::prompt::Prompt;
use crate::constants::{env_keys, error_messages};
use crate::errors::{AppError, ErrorCode};
use crate::llm::{CompletionRequest, LlmProvider};

/// Failure while producing a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No generative backend is configured
    #[error("{0}")]
    Configuration(String),
    /// The backend call failed
    #[error("{0}")]
    Upstream(String),
}

impl DispatchError {
    /// Short name reported as `debug.errorType`
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Upstream(_) => "upstream",
        }
    }

    /// Whether a backend credential was available for the failed call
    #[must_use]
    pub const fn api_key_exists(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl From<DispatchError> for AppError {
    fn from(error: DispatchError) -> Self {
        let code = match error {
            DispatchError::Configuration(_) => ErrorCode::ConfigMissing,
            DispatchError::Upstream(_) => ErrorCode::ExternalServiceError,
        };
        let debug = json!({
            "errorType": error.error_type(),
            "apiKeyExists": error.api_key_exists(),
        });
        Self::new(code, error_messages::RECOMMENDATION_FAILED)
            .with_detail(error.to_string())
            .with_debug(debug)
    }
}

/// Sends prompts to a generative backend
#[derive(Clone)]
pub struct RecommendationDispatcher {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl RecommendationDispatcher {
    /// Create a dispatcher around an optional provider
    #[must_use]
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { provider }
    }

    /// A dispatcher with no backend; every dispatch is a configuration error
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    /// Whether a provider is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Send the prompt and return the generated text verbatim
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Configuration`] when no provider is set and
    /// [`DispatchError::Upstream`] when the provider call fails.
    pub async fn dispatch(&self, prompt: &Prompt) -> Result<String, DispatchError> {
        let Some(provider) = self.provider.as_ref() else {
            warn!(
                summary.kind = %prompt.kind(),
                "Recommendation requested but no generative backend is configured"
            );
            return Err(DispatchError::Configuration(format!(
                "{} is not configured",
                env_keys::GEMINI_API_KEY
            )));
        };

        let request = CompletionRequest::new(prompt.as_str());

        debug!(
            provider = provider.name(),
            summary.kind = %prompt.kind(),
            prompt.len = prompt.as_str().len(),
            "Dispatching recommendation prompt"
        );

        match provider.complete(&request).await {
            Ok(response) => {
                info!(
                    provider = provider.name(),
                    model = %response.model,
                    summary.kind = %prompt.kind(),
                    tokens = response.usage.map(|usage| usage.total_tokens),
                    finish_reason = response.finish_reason.as_deref(),
                    "Recommendation generated"
                );
                Ok(response.content)
            }
            Err(error) => {
                warn!(
                    provider = provider.name(),
                    error_code = ?error.code,
                    error = %error.message,
                    "Recommendation backend call failed"
                );
                Err(DispatchError::Upstream(error.message))
            }
        }
    }
}

impl std::fmt::Debug for RecommendationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationDispatcher")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_envelope() {
        let error = AppError::from(DispatchError::Configuration(
            "GEMINI_API_KEY is not configured".to_owned(),
        ));
        assert_eq!(error.http_status(), 500);
        assert_eq!(error.message, "Failed to generate recommendation");
        assert_eq!(
            error.detail.as_deref(),
            Some("GEMINI_API_KEY is not configured")
        );
        assert_eq!(
            error.debug,
            Some(json!({"errorType": "configuration", "apiKeyExists": false}))
        );
    }

    #[test]
    fn test_upstream_error_keeps_message() {
        let error = DispatchError::Upstream("quota exceeded".to_owned());
        assert_eq!(error.to_string(), "quota exceeded");
        assert_eq!(error.error_type(), "upstream");
        assert!(error.api_key_exists());
    }
}
