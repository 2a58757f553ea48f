// ABOUTME: Server binary for the nutrition recommendation and food data API
// ABOUTME: Loads configuration, initializes logging and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # Nutrition API Server Binary
//!
//! Starts the HTTP API used by the nutrition-tracking web client: AI
//! recommendations, USDA food search and Spoonacular recipes.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nutrition_api_server::{
    config::environment::ServerConfig,
    logging,
    server::{self, ServerResources},
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "nutrition-api-server")]
#[command(about = "Nutrition API - AI recommendations, food search and recipes")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may carry logging settings, so load it before the subscriber
    dotenvy::dotenv().ok();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!("Starting Nutrition API Server");
    info!("{}", config.summary());

    for key in config.missing_credentials() {
        warn!("{key} is not set; the matching endpoints will answer with a configuration error");
    }

    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(config));
    if let Err(e) = server::run(resources).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Health:            GET  http://{host}:{port}/api/health");
    info!("   Recommendation:    POST http://{host}:{port}/api/recommendation");
    info!("   Food Search:       GET  http://{host}:{port}/api/food/search?query=");
    info!("   Recipe Search:     GET  http://{host}:{port}/api/recipes/search?query=");
    info!("   Random Recipes:    GET  http://{host}:{port}/api/recipes/random");
    info!("   Recipe Details:    GET  http://{host}:{port}/api/recipes/{{id}}");
    info!("=== End of Endpoint List ===");
}
