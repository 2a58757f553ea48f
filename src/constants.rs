// ABOUTME: Application constants grouped by domain (env keys, defaults, upstream endpoints)
// ABOUTME: Single place for names and fixed values shared by config, clients and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Environment variable names read by [`crate::config::environment::ServerConfig`]
pub mod env_keys {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Fallback listen port name used by most PaaS hosts
    pub const PORT: &str = "PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Deployment environment name
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Node-style deployment environment name, honored for compatibility
    pub const NODE_ENV: &str = "NODE_ENV";
    /// Comma separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Gemini credential
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini model override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Gemini base URL override
    pub const GEMINI_API_BASE_URL: &str = "GEMINI_API_BASE_URL";
    /// USDA `FoodData` Central credential
    pub const USDA_API_KEY: &str = "USDA_API_KEY";
    /// USDA base URL override
    pub const USDA_API_BASE_URL: &str = "USDA_API_BASE_URL";
    /// Spoonacular credential
    pub const SPOONACULAR_API_KEY: &str = "SPOONACULAR_API_KEY";
    /// Spoonacular base URL override
    pub const SPOONACULAR_API_BASE_URL: &str = "SPOONACULAR_API_BASE_URL";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 3000;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default Gemini model
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    /// Gemini REST endpoint
    pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// USDA REST endpoint
    pub const USDA_API_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Spoonacular REST endpoint
    pub const SPOONACULAR_API_BASE_URL: &str = "https://api.spoonacular.com";
}

/// Limits applied to proxied searches
pub mod limits {
    /// Shortest accepted search query, in characters
    pub const MIN_QUERY_LENGTH: usize = 2;
    /// Foods returned per USDA search
    pub const FOOD_SEARCH_PAGE_SIZE: u32 = 8;
    /// USDA data types included in searches
    pub const FOOD_SEARCH_DATA_TYPES: &str = "Foundation,SR Legacy";
    /// Recipes returned per Spoonacular search or random draw
    pub const RECIPE_PAGE_SIZE: u32 = 12;
}

/// USDA nutrient identifiers
pub mod nutrient_ids {
    /// Energy (kcal)
    pub const ENERGY_KCAL: u32 = 1008;
    /// Carbohydrate, by difference
    pub const CARBOHYDRATE: u32 = 1005;
    /// Protein
    pub const PROTEIN: u32 = 1003;
    /// Total lipid (fat)
    pub const TOTAL_FAT: u32 = 1004;
}

/// Service names
pub mod service_names {
    /// Server service name used in structured logs
    pub const NUTRITION_API_SERVER: &str = "nutrition_api_server";
    /// Generative text backend
    pub const GEMINI: &str = "gemini";
    /// Food composition backend
    pub const USDA: &str = "usda";
    /// Recipe backend
    pub const SPOONACULAR: &str = "spoonacular";
}

/// Error messages returned in response envelopes
pub mod error_messages {
    /// Request carried no summary
    pub const MISSING_SUMMARY: &str = "Invalid request. Please provide a summary.";
    /// Summary matched neither known shape
    pub const UNRECOGNIZED_SUMMARY: &str =
        "Invalid summary format. Expected either totals or items.";
    /// Recommendation generation failed
    pub const RECOMMENDATION_FAILED: &str = "Failed to generate recommendation";
    /// Unsupported HTTP method
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    /// Search query too short or missing
    pub const QUERY_TOO_SHORT: &str = "Query must be at least 2 characters long";
    /// Recipe id missing
    pub const RECIPE_ID_REQUIRED: &str = "Recipe ID is required";
    /// USDA key missing
    pub const USDA_NOT_CONFIGURED: &str = "USDA API key not configured";
    /// Spoonacular key missing
    pub const SPOONACULAR_NOT_CONFIGURED: &str = "Spoonacular API key not configured";
    /// Food search failed
    pub const FOOD_SEARCH_FAILED: &str = "Failed to search food";
    /// Recipe search failed
    pub const RECIPE_SEARCH_FAILED: &str = "Failed to search recipes";
    /// Random recipe draw failed
    pub const RANDOM_RECIPES_FAILED: &str = "Failed to fetch random recipes";
    /// Recipe details lookup failed
    pub const RECIPE_DETAILS_FAILED: &str = "Failed to fetch recipe details";
}
