// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads listen address, CORS policy and third-party credentials from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! Environment-based configuration management for production deployment
//!
//! Configuration is environment-only: a `.env` file in the working directory
//! is loaded first when present, then every setting is read from the process
//! environment. Credentials are optional at load time. A missing credential
//! disables the matching feature and is reported by `/api/health` and by the
//! failing endpoint, never by refusing to start.

use std::env;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, env_keys};

/// Environment type for logging and other deployment-sensitive settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma separated origins, or `*` for any origin
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Generative text backend configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; `None` when not configured
    pub api_key: Option<String>,
    /// Model used for recommendations
    pub model: String,
    /// REST base URL
    pub base_url: String,
}

impl GeminiConfig {
    /// Whether a credential is present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::GEMINI_MODEL.to_owned(),
            base_url: defaults::GEMINI_API_BASE_URL.to_owned(),
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Credential and endpoint for a keyed REST API (USDA, Spoonacular)
#[derive(Clone, Serialize, Deserialize)]
pub struct ExternalApiConfig {
    /// API key; `None` when not configured
    pub api_key: Option<String>,
    /// REST base URL
    pub base_url: String,
}

impl ExternalApiConfig {
    /// Config with the given base URL and no key
    #[must_use]
    pub fn unconfigured(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
        }
    }

    /// Whether a credential is present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for ExternalApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// CORS policy
    pub cors: CorsConfig,
    /// Generative text backend
    pub gemini: GeminiConfig,
    /// USDA `FoodData` Central
    pub usda: ExternalApiConfig,
    /// Spoonacular recipes
    pub spoonacular: ExternalApiConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::default(),
            cors: CorsConfig::default(),
            gemini: GeminiConfig::default(),
            usda: ExternalApiConfig::unconfigured(defaults::USDA_API_BASE_URL),
            spoonacular: ExternalApiConfig::unconfigured(defaults::SPOONACULAR_API_BASE_URL),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable has an unparseable value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_current_env()
    }

    /// Build configuration from the current process environment without
    /// touching `.env`
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable has an unparseable value
    pub fn from_current_env() -> Result<Self> {
        let http_port = match env::var(env_keys::HTTP_PORT).or_else(|_| env::var(env_keys::PORT))
        {
            Ok(value) => value
                .trim()
                .parse()
                .with_context(|| format!("Invalid HTTP port value: {value}"))?,
            Err(_) => defaults::HTTP_PORT,
        };

        let environment = env::var(env_keys::ENVIRONMENT)
            .or_else(|_| env::var(env_keys::NODE_ENV))
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let config = Self {
            http_port,
            host: env_var_or(env_keys::HOST, defaults::HOST),
            environment,
            cors: CorsConfig {
                allowed_origins: env_var_or(env_keys::CORS_ALLOWED_ORIGINS, "*"),
            },
            gemini: GeminiConfig {
                api_key: optional_secret(env_keys::GEMINI_API_KEY),
                model: env_var_or(env_keys::GEMINI_MODEL, defaults::GEMINI_MODEL),
                base_url: env_var_or(
                    env_keys::GEMINI_API_BASE_URL,
                    defaults::GEMINI_API_BASE_URL,
                ),
            },
            usda: ExternalApiConfig {
                api_key: optional_secret(env_keys::USDA_API_KEY),
                base_url: env_var_or(env_keys::USDA_API_BASE_URL, defaults::USDA_API_BASE_URL),
            },
            spoonacular: ExternalApiConfig {
                api_key: optional_secret(env_keys::SPOONACULAR_API_KEY),
                base_url: env_var_or(
                    env_keys::SPOONACULAR_API_BASE_URL,
                    defaults::SPOONACULAR_API_BASE_URL,
                ),
            },
        };

        Ok(config)
    }

    /// Names of credentials that are not configured
    #[must_use]
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.gemini.is_configured() {
            missing.push(env_keys::GEMINI_API_KEY);
        }
        if !self.usda.is_configured() {
            missing.push(env_keys::USDA_API_KEY);
        }
        if !self.spoonacular.is_configured() {
            missing.push(env_keys::SPOONACULAR_API_KEY);
        }
        missing
    }

    /// Get a log-safe summary of the configuration
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutrition API Server Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - CORS Origins: {}\n\
             - Gemini: {} (model {})\n\
             - USDA FoodData Central: {}\n\
             - Spoonacular: {}",
            self.host,
            self.http_port,
            self.environment,
            self.cors.allowed_origins,
            enabled_label(self.gemini.is_configured()),
            self.gemini.model,
            enabled_label(self.usda.is_configured()),
            enabled_label(self.spoonacular.is_configured()),
        )
    }
}

const fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read a credential, treating blank values as absent
fn optional_secret(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
