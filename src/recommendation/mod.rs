// ABOUTME: Recommendation core: summary classification, prompt rendering and dispatch
// ABOUTME: Re-exports the types used by the recommendation HTTP route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # Recommendations
//!
//! ```text
//! raw summary -> Summary::classify -> Prompt::render -> RecommendationDispatcher::dispatch
//! ```
//!
//! Classification and rendering are pure. Dispatch makes exactly one call to
//! the configured [`crate::llm::LlmProvider`].

/// Backend dispatch and its error type
pub mod dispatcher;
/// Prompt templates
pub mod prompt;
/// Summary classification and normalization
pub mod summary;

pub use dispatcher::{DispatchError, RecommendationDispatcher};
pub use prompt::{build_prompt, Prompt};
pub use summary::{
    Amount, DailySummary, DailyTotals, MealEntry, Summary, SummaryKind, ValidationError,
    WeeklySummary, WeeklyTotals,
};
