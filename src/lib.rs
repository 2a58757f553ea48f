// ABOUTME: Main library entry point for the Nutrition API Server
// ABOUTME: Provides AI nutrition recommendations plus food and recipe lookup over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

#![deny(unsafe_code)]

//! # Nutrition API Server
//!
//! Backend for a nutrition-tracking web client. The browser logs meals,
//! water and activity; this server enriches that data through third-party
//! services.
//!
//! ## Features
//!
//! - **Recommendations**: daily or weekly summaries become a prompt for
//!   Google Gemini, and the generated advice is returned verbatim
//! - **Food search**: USDA `FoodData` Central lookups reduced to calories and macros
//! - **Recipes**: Spoonacular search, random picks and details
//!
//! ## Architecture
//!
//! - **Recommendation**: summary classification, prompt templates, dispatch
//! - **LLM**: provider trait and the Gemini implementation
//! - **External**: USDA and Spoonacular clients
//! - **Routes / Server**: axum handlers, middleware and serving
//! - **Config**: environment-driven settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use nutrition_api_server::config::environment::ServerConfig;
//! use nutrition_api_server::server::{self, ServerResources};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     server::run(Arc::new(ServerResources::new(config))).await
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants grouped by domain
pub mod constants;

/// Unified error handling and JSON error envelopes
pub mod errors;

/// USDA and Spoonacular API clients
pub mod external;

/// LLM provider abstraction and Gemini implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request ids)
pub mod middleware;

/// Summary classification, prompt rendering and recommendation dispatch
pub mod recommendation;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;
