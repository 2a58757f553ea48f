// ABOUTME: Summary classification and normalization for daily and weekly nutrition summaries
// ABOUTME: Turns an arbitrary JSON value into a typed Summary or a ValidationError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrition API Server contributors

//! # Summary Classification
//!
//! Browser clients send one of two summary shapes:
//!
//! - **Daily** (dashboard): `totals {calories, water, carbs, protein, fat}`,
//!   `meals`, `waterLogs`, `nutritionEntries`
//! - **Weekly** (itemized): `items` plus optional `totals {calories, protein, fats, carbs}`
//!
//! Summaries are classified by their fields, with the daily check first: an
//! object whose `totals` contains `calories` is daily even when it also
//! carries `items`. A `"kind": "daily" | "weekly"` tag is consulted only when
//! neither shape matches; any other tag value is ignored.
//!
//! Field values are kept as raw JSON ([`Amount`]) and rendered the way a
//! JavaScript template literal would render them, so existing clients keep
//! getting the same prompt text.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::error_messages;
use crate::errors::{AppError, ErrorCode};

/// Summary rejected before any backend call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No summary, or a falsy one (`null`, `false`, `0`, `""`)
    #[error("Invalid request. Please provide a summary.")]
    MissingSummary,
    /// Summary matched neither the daily nor the weekly shape
    #[error("Invalid summary format. Expected either totals or items.")]
    UnrecognizedShape,
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::MissingSummary => Self::new(
                ErrorCode::MissingRequiredField,
                error_messages::MISSING_SUMMARY,
            ),
            ValidationError::UnrecognizedShape => Self::new(
                ErrorCode::InvalidFormat,
                error_messages::UNRECOGNIZED_SUMMARY,
            ),
        }
    }
}

/// JavaScript truthiness of a JSON value
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// Amount
// ============================================================================

/// A raw summary field, `None` when the key was absent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Amount(Option<Value>);

impl Amount {
    /// Wrap a JSON value
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(Some(value))
    }

    /// An absent field
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Read `key` from an optional object
    #[must_use]
    pub fn field(object: Option<&Map<String, Value>>, key: &str) -> Self {
        Self(object.and_then(|o| o.get(key)).cloned())
    }

    /// Replace an absent or falsy value with `0`
    ///
    /// A real `0` and a missing field both come out as `0`.
    #[must_use]
    pub fn or_zero(self) -> Self {
        match self.0 {
            Some(value) if is_truthy(&value) => Self(Some(value)),
            _ => Self(Some(Value::from(0))),
        }
    }

    /// The underlying value
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }
}

impl From<Value> for Amount {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => f.write_str(&display_value(value)),
            None => f.write_str("undefined"),
        }
    }
}

/// Render a JSON value as JavaScript string interpolation does
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => display_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn display_number(number: &serde_json::Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    number
        .as_f64()
        .map_or_else(|| number.to_string(), js_number)
}

/// Format a float the way JavaScript's `Number.prototype.toString` does
///
/// Outside `[1e-6, 1e21)` the value switches to exponent form with an
/// explicit sign on positive exponents (`1e-7`, `1e+21`).
#[allow(clippy::float_cmp)]
fn js_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_owned();
    }
    if (1e-6..1e21).contains(&n.abs()) {
        return n.to_string();
    }
    let exponential = format!("{n:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

/// Compact JSON with numbers written as `JSON.stringify` writes them
fn js_json(value: &Value) -> String {
    match value {
        Value::Number(number) => display_number(number),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(js_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(object) => {
            let members: Vec<String> = object
                .iter()
                .map(|(key, value)| format!("{}:{}", Value::from(key.as_str()), js_json(value)))
                .collect();
            format!("{{{}}}", members.join(","))
        }
        scalar => scalar.to_string(),
    }
}

// ============================================================================
// Summary Types
// ============================================================================

/// Which template a summary renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// Single-day dashboard summary
    Daily,
    /// Week of logged food items
    Weekly,
}

impl SummaryKind {
    /// Tag value accepted in the `kind` field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    fn from_tag(tag: &Value) -> Option<Self> {
        match tag.as_str()? {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily totals, rendered raw
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyTotals {
    /// Energy in kcal
    pub calories: Amount,
    /// Water in ml
    pub water: Amount,
    /// Carbohydrates in grams
    pub carbs: Amount,
    /// Protein in grams
    pub protein: Amount,
    /// Fat in grams
    pub fat: Amount,
}

/// One logged meal
#[derive(Debug, Clone, PartialEq)]
pub struct MealEntry {
    /// Meal name
    pub name: Amount,
    /// Meal energy in kcal
    pub calories: Amount,
}

/// Single-day dashboard summary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySummary {
    /// Day totals
    pub totals: DailyTotals,
    /// Meals in logging order
    pub meals: Vec<MealEntry>,
    /// Number of water log entries
    pub water_log_count: usize,
    /// Number of nutrition entries
    pub nutrition_entry_count: usize,
}

impl DailySummary {
    fn from_object(object: &Map<String, Value>) -> Self {
        let totals = object.get("totals").and_then(Value::as_object);
        let meals = object
            .get("meals")
            .and_then(Value::as_array)
            .map(|meals| {
                meals
                    .iter()
                    .map(|meal| {
                        let meal = meal.as_object();
                        MealEntry {
                            name: Amount::field(meal, "name"),
                            calories: Amount::field(meal, "calories"),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            totals: DailyTotals {
                calories: Amount::field(totals, "calories"),
                water: Amount::field(totals, "water"),
                carbs: Amount::field(totals, "carbs"),
                protein: Amount::field(totals, "protein"),
                fat: Amount::field(totals, "fat"),
            },
            meals,
            water_log_count: sequence_len(object.get("waterLogs")),
            nutrition_entry_count: sequence_len(object.get("nutritionEntries")),
        }
    }

    /// Meals as `"<name> (<calories> kcal)"` joined by `", "`, or `"None"`
    #[must_use]
    pub fn meals_list(&self) -> String {
        if self.meals.is_empty() {
            return "None".to_owned();
        }
        self.meals
            .iter()
            .map(|meal| format!("{} ({} kcal)", meal.name, meal.calories))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Weekly totals after zero-defaulting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeeklyTotals {
    /// Energy in kcal
    pub calories: Amount,
    /// Protein in grams
    pub protein: Amount,
    /// Fats in grams
    pub fats: Amount,
    /// Carbohydrates in grams
    pub carbs: Amount,
}

/// A week of logged food items
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    /// Food items exactly as sent, `None` when the key was absent
    pub items: Option<Value>,
    /// Week totals, each `0` when absent or falsy
    pub totals: WeeklyTotals,
}

impl WeeklySummary {
    fn from_object(object: &Map<String, Value>) -> Self {
        let totals = object.get("totals").and_then(Value::as_object);
        Self {
            items: object.get("items").cloned(),
            totals: WeeklyTotals {
                calories: Amount::field(totals, "calories").or_zero(),
                protein: Amount::field(totals, "protein").or_zero(),
                fats: Amount::field(totals, "fats").or_zero(),
                carbs: Amount::field(totals, "carbs").or_zero(),
            },
        }
    }

    /// Items as compact JSON, keys in the order they were received
    ///
    /// Absent items render as `undefined`.
    #[must_use]
    pub fn items_json(&self) -> String {
        self.items
            .as_ref()
            .map_or_else(|| "undefined".to_owned(), js_json)
    }
}

/// A classified summary
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// Single-day dashboard summary
    Daily(DailySummary),
    /// Week of logged food items
    Weekly(WeeklySummary),
}

impl Summary {
    /// Classify and normalize a raw summary
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingSummary`] for an absent or falsy
    /// summary and [`ValidationError::UnrecognizedShape`] when neither shape
    /// matches and there is no usable `kind` tag.
    pub fn classify(input: Option<&Value>) -> Result<Self, ValidationError> {
        let input = input
            .filter(|value| is_truthy(value))
            .ok_or(ValidationError::MissingSummary)?;
        let object = input
            .as_object()
            .ok_or(ValidationError::UnrecognizedShape)?;

        let kind = Self::sniff_kind(object)
            .or_else(|| object.get("kind").and_then(SummaryKind::from_tag))
            .ok_or(ValidationError::UnrecognizedShape)?;

        Ok(match kind {
            SummaryKind::Daily => Self::Daily(DailySummary::from_object(object)),
            SummaryKind::Weekly => Self::Weekly(WeeklySummary::from_object(object)),
        })
    }

    /// Shape detection, daily first
    fn sniff_kind(object: &Map<String, Value>) -> Option<SummaryKind> {
        let has_daily_totals = object
            .get("totals")
            .and_then(Value::as_object)
            .is_some_and(|totals| totals.contains_key("calories"));

        if has_daily_totals {
            Some(SummaryKind::Daily)
        } else if object.contains_key("items") {
            Some(SummaryKind::Weekly)
        } else {
            None
        }
    }

    /// The template this summary renders with
    #[must_use]
    pub const fn kind(&self) -> SummaryKind {
        match self {
            Self::Daily(_) => SummaryKind::Daily,
            Self::Weekly(_) => SummaryKind::Weekly,
        }
    }
}

fn sequence_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}
