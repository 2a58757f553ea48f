// ABOUTME: Route module organization for the Nutrition API Server HTTP endpoints
// ABOUTME: Groups route definitions by domain and holds shared query validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! Route module for the Nutrition API Server
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the recommendation core or an external client.

/// USDA food search proxy
pub mod food;
/// Health check route
pub mod health;
/// Spoonacular recipe proxy
pub mod recipes;
/// Recommendation generation route
pub mod recommendation;

pub use food::FoodRoutes;
pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;
pub use recommendation::RecommendationRoutes;

use serde::Deserialize;

use crate::constants::{error_messages, limits};
use crate::errors::AppError;

/// `?query=` parameter shared by the search proxies
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Search text
    pub query: Option<String>,
}

impl SearchQuery {
    /// The query when it has at least two characters
    ///
    /// # Errors
    ///
    /// Returns a 400 error when the query is missing or too short
    pub fn validated(self) -> Result<String, AppError> {
        self.query
            .filter(|query| query.encode_utf16().count() >= limits::MIN_QUERY_LENGTH)
            .ok_or_else(|| AppError::invalid_input(error_messages::QUERY_TOO_SHORT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_length_validation() {
        let short = SearchQuery {
            query: Some("a".to_owned()),
        };
        assert_eq!(
            short.validated().unwrap_err().message,
            "Query must be at least 2 characters long"
        );
        assert!(SearchQuery::default().validated().is_err());

        let ok = SearchQuery {
            query: Some("ok".to_owned()),
        };
        assert_eq!(ok.validated().unwrap(), "ok");
    }
}
