// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports liveness and which third-party credentials are configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! Health check route
//!
//! `GET /api/health` always answers 200. The `services` map tells operators
//! which integrations are usable without exposing any credential.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::server::ServerResources;

/// Configured integrations
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    /// Generative recommendations
    pub gemini: bool,
    /// Food search
    pub usda: bool,
    /// Recipe search
    pub spoonacular: bool,
}

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: &'static str,
    /// Human-readable status
    pub message: &'static str,
    /// RFC 3339 time of the check
    pub timestamp: String,
    /// Configured integrations
    pub services: ServiceStatus,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok",
            message: "Server is running",
            timestamp: chrono::Utc::now().to_rfc3339(),
            services: ServiceStatus {
                gemini: resources.dispatcher.is_configured(),
                usda: resources.usda.is_some(),
                spoonacular: resources.spoonacular.is_some(),
            },
        })
    }
}
