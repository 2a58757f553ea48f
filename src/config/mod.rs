// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! Configuration module
//!
//! All settings come from environment variables; see [`environment`].

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, Environment, ExternalApiConfig, GeminiConfig, ServerConfig};
