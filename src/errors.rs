// ABOUTME: Unified error type with error codes, HTTP status mapping and JSON envelopes
// ABOUTME: Every handler failure is converted into AppError and rendered as a JSON body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # Unified Error Handling System
//!
//! Defines the error codes used across the server, their HTTP status, and the
//! JSON envelope sent to clients:
//!
//! ```json
//! { "error": "<summary>", "message": "<detail>", "debug": { ... } }
//! ```
//!
//! `message` and `debug` are only present when the error carries them.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field was missing
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// Input had an unexpected structure
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    /// HTTP method not supported by the endpoint
    #[serde(rename = "METHOD_NOT_ALLOWED")]
    MethodNotAllowed = 3003,

    // Resource Management (4000-4999)
    /// Resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// An upstream service failed
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// An upstream service rejected the call for quota reasons
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// A required setting (usually a credential) is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// A setting is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::InvalidFormat => 400,
            Self::ResourceNotFound => 404,
            Self::MethodNotAllowed => 405,
            // Upstream failures surface as 500 to keep the public contract stable
            Self::ExternalServiceError
            | Self::ExternalRateLimited
            | Self::ConfigMissing
            | Self::ConfigInvalid => 500,
        }
    }
}

/// Unified error type for the application
#[derive(Debug)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Client-facing summary, rendered as `error`
    pub message: String,
    /// Diagnostic detail, rendered as `message`
    pub detail: Option<String>,
    /// Extra diagnostics, rendered as `debug`
    pub debug: Option<serde_json::Value>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
            debug: None,
        }
    }

    /// Attach a diagnostic detail string
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach structured diagnostics
    #[must_use]
    pub fn with_debug(mut self, debug: serde_json::Value) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Put a client-facing summary in front of this error
    ///
    /// The current message moves to `detail`, so the envelope reads
    /// `{"error": summary, "message": <previous message>}`.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        let previous = std::mem::replace(&mut self.message, summary.into());
        self.detail = Some(previous);
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Unsupported HTTP method
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            ErrorCode::MethodNotAllowed,
            crate::constants::error_messages::METHOD_NOT_ALLOWED,
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for AppError {}

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Client-facing summary
    pub error: String,
    /// Diagnostic detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Extra diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: error.message,
            message: error.detail,
            debug: error.debug,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::MethodNotAllowed.http_status(), 405);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ExternalServiceError.http_status(), 500);
        assert_eq!(ErrorCode::ConfigMissing.http_status(), 500);
    }

    #[test]
    fn test_error_response_omits_empty_fields() {
        let response = ErrorResponse::from(AppError::method_not_allowed());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Method not allowed" }));
    }

    #[test]
    fn test_error_response_carries_detail() {
        let error = AppError::new(ErrorCode::ExternalServiceError, "Failed to search food")
            .with_detail("USDA API Error: 503 Service Unavailable");
        assert_eq!(
            error.to_string(),
            "Failed to search food: USDA API Error: 503 Service Unavailable"
        );

        let json = serde_json::to_value(ErrorResponse::from(error)).unwrap();
        assert_eq!(json["error"], "Failed to search food");
        assert_eq!(json["message"], "USDA API Error: 503 Service Unavailable");
        assert!(json.get("debug").is_none());
    }
}
