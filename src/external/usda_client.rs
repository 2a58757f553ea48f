// ABOUTME: USDA FoodData Central API client for food composition search
// ABOUTME: Maps search hits to per-100g calorie and macro summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! USDA `FoodData` Central API Client
//!
//! Searches Foundation and SR Legacy foods and reduces each hit to the
//! handful of values the client's food picker shows.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use nutrition_api_server::external::usda_client::{UsdaClient, UsdaClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UsdaClient::new(UsdaClientConfig {
//!     api_key: "your_api_key".to_owned(),
//!     base_url: "https://api.nal.usda.gov/fdc/v1".to_owned(),
//! });
//! let foods = client.search_foods("apple").await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{endpoint_url, status_error, transport_error};
use crate::config::ExternalApiConfig;
use crate::constants::{defaults, limits, nutrient_ids};
use crate::errors::AppError;

/// USDA API client configuration
#[derive(Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: defaults::USDA_API_BASE_URL.to_owned(),
        }
    }
}

impl std::fmt::Debug for UsdaClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsdaClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Food entry returned by `/api/food/search`; nutrient values are per 100g
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSummary {
    /// Food description
    pub name: String,
    /// Energy in kcal
    pub calories: i64,
    /// Serving the values refer to
    pub serving: String,
    /// Carbohydrate in grams
    pub carbs: i64,
    /// Protein in grams
    pub protein: i64,
    /// Total fat in grams
    pub fat: i64,
    /// `FoodData` Central ID, relayed as sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<Value>,
}

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Option<Vec<SearchFood>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    #[serde(default)]
    fdc_id: Option<Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    lowercase_description: Option<String>,
    #[serde(default)]
    food_nutrients: Option<Vec<SearchNutrient>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    #[serde(default)]
    nutrient_id: Option<u32>,
    #[serde(default)]
    value: Option<f64>,
}

impl SearchFood {
    /// First nutrient with the given id, rounded half up; 0 when absent
    #[allow(clippy::cast_possible_truncation)]
    fn nutrient(&self, nutrient_id: u32) -> i64 {
        self.food_nutrients
            .iter()
            .flatten()
            .find(|n| n.nutrient_id == Some(nutrient_id))
            .and_then(|n| n.value)
            .map_or(0, |value| (value + 0.5).floor() as i64)
    }

    fn into_summary(self) -> FoodSummary {
        let calories = self.nutrient(nutrient_ids::ENERGY_KCAL);
        let carbs = self.nutrient(nutrient_ids::CARBOHYDRATE);
        let protein = self.nutrient(nutrient_ids::PROTEIN);
        let fat = self.nutrient(nutrient_ids::TOTAL_FAT);
        let name = [self.description, self.lowercase_description]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| "Unknown".to_owned());

        FoodSummary {
            name,
            calories,
            serving: "100g".to_owned(),
            carbs,
            protein,
            fat,
            food_id: self.fdc_id,
        }
    }
}

/// USDA `FoodData` Central API Client
#[derive(Debug, Clone)]
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    #[must_use]
    pub fn new(config: UsdaClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client from server configuration; `None` without an API key
    #[must_use]
    pub fn from_config(config: &ExternalApiConfig) -> Option<Self> {
        config.api_key.as_ref().map(|api_key| {
            Self::new(UsdaClientConfig {
                api_key: api_key.clone(),
                base_url: config.base_url.clone(),
            })
        })
    }

    /// Search Foundation and SR Legacy foods
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, USDA answers with a non-success
    /// status, or the body is not a search response.
    #[instrument(skip(self), fields(service = "usda"))]
    pub async fn search_foods(&self, query: &str) -> Result<Vec<FoodSummary>, AppError> {
        let url = endpoint_url(&self.config.base_url, &["foods", "search"])?;
        let page_size = limits::FOOD_SEARCH_PAGE_SIZE.to_string();

        let response = self
            .http_client
            .get(url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("query", query),
                ("pageSize", page_size.as_str()),
                ("dataType", limits::FOOD_SEARCH_DATA_TYPES),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "USDA search failed");
            return Err(status_error("USDA", status));
        }

        let search_response: SearchResponse = response.json().await.map_err(transport_error)?;
        let foods: Vec<FoodSummary> = search_response
            .foods
            .unwrap_or_default()
            .into_iter()
            .map(SearchFood::into_summary)
            .collect();

        debug!(count = foods.len(), "USDA search completed");
        Ok(foods)
    }
}
