// ABOUTME: LLM provider abstraction for the generative text backend behind recommendations
// ABOUTME: Defines the single-prompt completion request/response and the LlmProvider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # LLM Provider Interface
//!
//! The recommendation dispatcher talks to generative backends only through
//! [`LlmProvider`]. Production uses [`GeminiProvider`]; tests plug in their
//! own implementations.
//!
//! A request is one rendered prompt sent as a single user turn. Responses
//! are awaited in full; nothing is streamed.
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use nutrition_api_server::llm::{CompletionRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = CompletionRequest::new("Suggest a high-protein snack.");
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A single-prompt completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Prompt text, sent as the only user message
    pub prompt: String,
}

impl CompletionRequest {
    /// Create a request for the given prompt
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Generated text and call metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text, unmodified
    pub content: String,
    /// Model that produced the text
    pub model: String,
    /// Token accounting, when the backend reports it
    pub usage: Option<TokenUsage>,
    /// Why generation stopped (`STOP`, `MAX_TOKENS`, ...)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// Generative text backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider identifier used in logs (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Send the prompt and wait for the full response
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, AppError>;
}
