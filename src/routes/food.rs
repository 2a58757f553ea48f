// ABOUTME: Food search route proxying USDA FoodData Central
// ABOUTME: Validates the query and returns per-100g calorie and macro summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::SearchQuery;
use crate::constants::error_messages;
use crate::errors::{AppError, ErrorCode};
use crate::external::FoodSummary;
use crate::server::ServerResources;

/// Food search response body
#[derive(Debug, Serialize, Deserialize)]
pub struct FoodSearchResponse {
    /// Matching foods
    pub foods: Vec<FoodSummary>,
    /// Always `true`
    pub success: bool,
}

/// Food routes implementation
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create the food search route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/food/search", get(Self::handle_search))
            .with_state(resources)
    }

    /// Handle GET /api/food/search?query=
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<SearchQuery>,
    ) -> Result<Json<FoodSearchResponse>, AppError> {
        let query = params.validated()?;

        let client = resources.usda.as_ref().ok_or_else(|| {
            AppError::new(ErrorCode::ConfigMissing, error_messages::USDA_NOT_CONFIGURED)
        })?;

        let foods = client.search_foods(&query).await.map_err(|e| {
            error!(error = %e, "Error searching food");
            e.with_summary(error_messages::FOOD_SEARCH_FAILED)
        })?;

        Ok(Json(FoodSearchResponse {
            foods,
            success: true,
        }))
    }
}
