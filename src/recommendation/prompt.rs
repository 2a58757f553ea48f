// ABOUTME: Prompt rendering for daily and weekly nutrition recommendations
// ABOUTME: Fixed instruction templates filled from a classified summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! Prompt templates
//!
//! The template wording is part of the contract with the generative backend.
//! Change it only together with a review of the recommendations it produces.

use std::fmt;

use serde_json::Value;

use super::summary::{DailySummary, Summary, SummaryKind, ValidationError, WeeklySummary};

/// Rendered instruction text for the generative backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    kind: SummaryKind,
    text: String,
}

impl Prompt {
    /// Render the template matching a summary
    #[must_use]
    pub fn render(summary: &Summary) -> Self {
        let text = match summary {
            Summary::Daily(daily) => render_daily(daily),
            Summary::Weekly(weekly) => render_weekly(weekly),
        };
        Self {
            kind: summary.kind(),
            text,
        }
    }

    /// Template the prompt was rendered from
    #[must_use]
    pub const fn kind(&self) -> SummaryKind {
        self.kind
    }

    /// Prompt text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take the prompt text
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Classify a raw summary and render its prompt
///
/// # Errors
///
/// Returns a [`ValidationError`] when the summary is missing or matches
/// neither shape.
pub fn build_prompt(input: Option<&Value>) -> Result<Prompt, ValidationError> {
    Summary::classify(input).map(|summary| Prompt::render(&summary))
}

fn render_daily(summary: &DailySummary) -> String {
    let totals = &summary.totals;
    format!(
        "Analyze this user's daily nutrition intake:

Total Calories: {calories} kcal
Total Water: {water} ml
Total Carbs: {carbs}g
Total Protein: {protein}g
Total Fat: {fat}g

Meals logged today: {meals}
Water logs: {water_logs} entries
Nutrition entries: {nutrition_entries} entries

Please provide:
1. A brief assessment of their daily intake
2. Specific recommendations for today (what to add/adjust for the rest of the day)
3. Hydration advice if water intake is low
4. Macro balance feedback

Keep the response concise (3-4 sentences) and actionable for today.",
        calories = totals.calories,
        water = totals.water,
        carbs = totals.carbs,
        protein = totals.protein,
        fat = totals.fat,
        meals = summary.meals_list(),
        water_logs = summary.water_log_count,
        nutrition_entries = summary.nutrition_entry_count,
    )
}

fn render_weekly(summary: &WeeklySummary) -> String {
    let totals = &summary.totals;
    format!(
        "User ate these items this week: {items}.
Total nutrition for the week: Calories: {calories} kcal, Protein: {protein}g, Fats: {fats}g, Carbs: {carbs}g.

Please analyze this weekly food intake and provide:
1. A brief assessment of their current eating pattern
2. Specific recommendations on what to eat more or less of
3. Any macro nutrient adjustments needed (protein, fats, carbs)

Keep the response concise (3-4 sentences) and actionable.",
        items = summary.items_json(),
        calories = totals.calories,
        protein = totals.protein,
        fats = totals.fats,
        carbs = totals.carbs,
    )
}
