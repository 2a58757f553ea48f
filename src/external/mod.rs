// ABOUTME: External API client modules (USDA FoodData Central, Spoonacular)
// ABOUTME: Shared URL building and error mapping for keyed REST upstreams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! External API Clients
//!
//! Thin clients for the food-composition and recipe APIs proxied by the
//! server. Errors carry the message returned to callers in the envelope's
//! `message` field, e.g. `USDA API Error: 503`.

pub mod spoonacular_client;
pub mod usda_client;

pub use spoonacular_client::{SpoonacularClient, SpoonacularClientConfig};
pub use usda_client::{FoodSummary, UsdaClient, UsdaClientConfig};

use reqwest::{StatusCode, Url};

use crate::errors::{AppError, ErrorCode};

/// Append path segments to a base URL, percent-encoding each segment
pub(crate) fn endpoint_url(base_url: &str, segments: &[&str]) -> Result<Url, AppError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::new(ErrorCode::ConfigInvalid, format!("Invalid base URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("Base URL cannot have a path: {base_url}"),
            )
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Error for a non-success upstream status
pub(crate) fn status_error(service: &str, status: StatusCode) -> AppError {
    AppError::new(
        ErrorCode::ExternalServiceError,
        format!("{service} API Error: {}", status.as_u16()),
    )
}

/// Error for a failed request; the URL (which carries the key) is stripped
pub(crate) fn transport_error(error: reqwest::Error) -> AppError {
    AppError::new(
        ErrorCode::ExternalServiceError,
        error.without_url().to_string(),
    )
}
