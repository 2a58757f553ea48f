// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports router request helpers, stub LLM providers and stub upstream servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Each integration test binary uses a different subset of the helpers
#![allow(dead_code)]

pub mod axum_test;
pub mod stub_provider;
pub mod stub_upstream;

use std::sync::Arc;

use nutrition_api_server::config::ServerConfig;
use nutrition_api_server::llm::LlmProvider;
use nutrition_api_server::recommendation::RecommendationDispatcher;
use nutrition_api_server::server::{build_router, ServerResources};

/// Router over default configuration with the given recommendation provider
pub fn router_with_provider(provider: Option<Arc<dyn LlmProvider>>) -> axum::Router {
    let resources = ServerResources::new(ServerConfig::default())
        .with_dispatcher(RecommendationDispatcher::new(provider));
    build_router(Arc::new(resources))
}

/// Router over the given configuration
pub fn router_with_config(config: ServerConfig) -> axum::Router {
    build_router(Arc::new(ServerResources::new(config)))
}
