// ABOUTME: HTTP server assembly: shared resources, router construction and serving
// ABOUTME: Wires routes with CORS, request ids and tracing, and shuts down on Ctrl+C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # HTTP Server
//!
//! [`ServerResources`] holds everything handlers share. It is built once at
//! startup and only read afterwards, so handlers receive it as
//! `State<Arc<ServerResources>>` without any locking.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::external::{SpoonacularClient, UsdaClient};
use crate::llm::{GeminiProvider, LlmProvider};
use crate::middleware::{request_id_middleware, setup_cors};
use crate::recommendation::RecommendationDispatcher;
use crate::routes::{FoodRoutes, HealthRoutes, RecipeRoutes, RecommendationRoutes};

/// Shared, read-only state for all handlers
#[derive(Debug)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Recommendation backend
    pub dispatcher: RecommendationDispatcher,
    /// Food search client; `None` without a USDA key
    pub usda: Option<UsdaClient>,
    /// Recipe client; `None` without a Spoonacular key
    pub spoonacular: Option<SpoonacularClient>,
}

impl ServerResources {
    /// Build resources from configuration
    ///
    /// Missing credentials leave the matching feature disabled.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let provider = GeminiProvider::from_config(&config.gemini)
            .map(|provider| Arc::new(provider) as Arc<dyn LlmProvider>);

        Self {
            dispatcher: RecommendationDispatcher::new(provider),
            usda: UsdaClient::from_config(&config.usda),
            spoonacular: SpoonacularClient::from_config(&config.spoonacular),
            config: Arc::new(config),
        }
    }

    /// Replace the recommendation dispatcher
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: RecommendationDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }
}

/// Build the application router with all routes and layers
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(RecommendationRoutes::routes(Arc::clone(&resources)))
        .merge(FoodRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(cors)
}

async fn handle_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Bind the configured address and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {address}"))?;

    info!("HTTP server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
