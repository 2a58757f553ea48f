// ABOUTME: Recipe routes proxying the Spoonacular API
// ABOUTME: Search, random picks and full recipe details relayed as opaque JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::SearchQuery;
use crate::constants::error_messages;
use crate::errors::{AppError, ErrorCode};
use crate::external::SpoonacularClient;
use crate::server::ServerResources;

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/search", get(Self::handle_search))
            .route("/api/recipes/random", get(Self::handle_random))
            .route("/api/recipes/:id", get(Self::handle_details))
            .with_state(resources)
    }

    fn client(resources: &ServerResources) -> Result<&SpoonacularClient, AppError> {
        resources.spoonacular.as_ref().ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                error_messages::SPOONACULAR_NOT_CONFIGURED,
            )
        })
    }

    /// Handle GET /api/recipes/search?query=
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<SearchQuery>,
    ) -> Result<Json<Value>, AppError> {
        let query = params.validated()?;
        let recipes = Self::client(&resources)?
            .search_recipes(&query)
            .await
            .map_err(|e| {
                error!(error = %e, "Error searching recipes");
                e.with_summary(error_messages::RECIPE_SEARCH_FAILED)
            })?;

        Ok(Json(json!({ "recipes": recipes, "success": true })))
    }

    /// Handle GET /api/recipes/random
    async fn handle_random(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<Value>, AppError> {
        let recipes = Self::client(&resources)?
            .random_recipes()
            .await
            .map_err(|e| {
                error!(error = %e, "Error fetching random recipes");
                e.with_summary(error_messages::RANDOM_RECIPES_FAILED)
            })?;

        Ok(Json(json!({ "recipes": recipes, "success": true })))
    }

    /// Handle GET /api/recipes/:id
    async fn handle_details(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<String>,
    ) -> Result<Json<Value>, AppError> {
        let recipe_id = recipe_id.trim();
        if recipe_id.is_empty() {
            return Err(AppError::invalid_input(error_messages::RECIPE_ID_REQUIRED));
        }

        let recipe = Self::client(&resources)?
            .recipe_details(recipe_id)
            .await
            .map_err(|e| {
                error!(error = %e, recipe_id, "Error fetching recipe details");
                e.with_summary(error_messages::RECIPE_DETAILS_FAILED)
            })?;

        Ok(Json(json!({ "recipe": recipe, "success": true })))
    }
}
