// ABOUTME: Spoonacular recipe API client for search, random picks and recipe details
// ABOUTME: Relays recipe payloads as opaque JSON for the browser client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! Spoonacular API Client
//!
//! Recipe payloads are large and only rendered by the browser, so they are
//! passed through as [`serde_json::Value`] rather than modelled here.
//!
//! # API Reference
//! Spoonacular Food API: <https://spoonacular.com/food-api/docs>

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{endpoint_url, status_error, transport_error};
use crate::config::ExternalApiConfig;
use crate::constants::{defaults, limits};
use crate::errors::AppError;

/// Spoonacular client configuration
#[derive(Clone)]
pub struct SpoonacularClientConfig {
    /// Spoonacular API key
    pub api_key: String,
    /// Base URL (default: <https://api.spoonacular.com>)
    pub base_url: String,
}

impl Default for SpoonacularClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: defaults::SPOONACULAR_API_BASE_URL.to_owned(),
        }
    }
}

impl std::fmt::Debug for SpoonacularClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoonacularClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RandomRecipesResponse {
    #[serde(default)]
    recipes: Option<Vec<Value>>,
}

/// Spoonacular recipe API client
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    config: SpoonacularClientConfig,
    http_client: reqwest::Client,
}

impl SpoonacularClient {
    /// Create a new Spoonacular client
    #[must_use]
    pub fn new(config: SpoonacularClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client from server configuration; `None` without an API key
    #[must_use]
    pub fn from_config(config: &ExternalApiConfig) -> Option<Self> {
        config.api_key.as_ref().map(|api_key| {
            Self::new(SpoonacularClientConfig {
                api_key: api_key.clone(),
                base_url: config.base_url.clone(),
            })
        })
    }

    /// Search recipes with nutrition and ingredient information
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Spoonacular answers with a
    /// non-success status.
    #[instrument(skip(self), fields(service = "spoonacular"))]
    pub async fn search_recipes(&self, query: &str) -> Result<Vec<Value>, AppError> {
        let number = limits::RECIPE_PAGE_SIZE.to_string();
        let response: ComplexSearchResponse = self
            .get_json(
                &["recipes", "complexSearch"],
                &[
                    ("query", query),
                    ("number", number.as_str()),
                    ("addRecipeNutrition", "true"),
                    ("addRecipeInformation", "true"),
                    ("fillIngredients", "true"),
                ],
            )
            .await?;

        let recipes = response.results.unwrap_or_default();
        debug!(count = recipes.len(), "Recipe search completed");
        Ok(recipes)
    }

    /// Draw a page of random recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Spoonacular answers with a
    /// non-success status.
    #[instrument(skip(self), fields(service = "spoonacular"))]
    pub async fn random_recipes(&self) -> Result<Vec<Value>, AppError> {
        let number = limits::RECIPE_PAGE_SIZE.to_string();
        let response: RandomRecipesResponse = self
            .get_json(&["recipes", "random"], &[("number", number.as_str())])
            .await?;
        Ok(response.recipes.unwrap_or_default())
    }

    /// Full recipe information including nutrition
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Spoonacular answers with a
    /// non-success status (including 404 for unknown ids).
    #[instrument(skip(self), fields(service = "spoonacular"))]
    pub async fn recipe_details(&self, recipe_id: &str) -> Result<Value, AppError> {
        self.get_json(
            &["recipes", recipe_id, "information"],
            &[("includeNutrition", "true")],
        )
        .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = endpoint_url(&self.config.base_url, segments)?;

        let response = self
            .http_client
            .get(url)
            .query(query)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Spoonacular request failed");
            return Err(status_error("Spoonacular", status));
        }

        response.json().await.map_err(transport_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_result_lists_become_empty() {
        let search: ComplexSearchResponse = serde_json::from_value(json!({"offset": 0})).unwrap();
        assert!(search.results.unwrap_or_default().is_empty());

        let random: RandomRecipesResponse =
            serde_json::from_value(json!({"recipes": null})).unwrap();
        assert!(random.recipes.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = ExternalApiConfig::unconfigured("https://api.spoonacular.com");
        assert!(SpoonacularClient::from_config(&config).is_none());

        let config = ExternalApiConfig {
            api_key: Some("key".to_owned()),
            ..config
        };
        assert!(SpoonacularClient::from_config(&config).is_some());
    }
}
