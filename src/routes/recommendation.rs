// ABOUTME: Recommendation route turning a nutrition summary into generated advice
// ABOUTME: Handles POST, the OPTIONS pre-flight, and rejects every other method
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! `POST /api/recommendation`
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | success | 200 | `{"recommendation": text, "success": true}` |
//! | missing or unrecognized summary | 400 | `{"error": text}` |
//! | backend not configured or failing | 500 | `{"error", "message", "debug"}` |
//! | `OPTIONS` | 200 | empty |
//! | any other method | 405 | `{"error": "Method not allowed"}` |
//!
//! A body that is missing or is not JSON counts as a missing summary.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::recommendation::build_prompt;
use crate::server::ServerResources;

/// Request body
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    /// Daily or weekly summary, classified by the recommendation core
    #[serde(default)]
    pub summary: Option<Value>,
}

/// Success body
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Generated text, unmodified
    pub recommendation: String,
    /// Always `true`
    pub success: bool,
}

/// Recommendation routes implementation
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create the recommendation route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recommendation",
                post(Self::handle_recommendation)
                    .options(Self::handle_preflight)
                    .fallback(Self::handle_method_not_allowed),
            )
            .with_state(resources)
    }

    async fn handle_recommendation(
        State(resources): State<Arc<ServerResources>>,
        body: Option<Json<RecommendationRequest>>,
    ) -> Result<Json<RecommendationResponse>, AppError> {
        let request = body.map(|Json(request)| request).unwrap_or_default();

        let prompt = build_prompt(request.summary.as_ref()).map_err(|e| {
            warn!(error = %e, "Rejected recommendation request");
            AppError::from(e)
        })?;

        info!(summary.kind = %prompt.kind(), "Generating recommendation");

        let recommendation = resources
            .dispatcher
            .dispatch(&prompt)
            .await
            .map_err(AppError::from)?;

        Ok(Json(RecommendationResponse {
            recommendation,
            success: true,
        }))
    }

    async fn handle_preflight() -> StatusCode {
        StatusCode::OK
    }

    async fn handle_method_not_allowed() -> AppError {
        AppError::method_not_allowed()
    }
}
