//! Estimate result models.
//!
//! This module contains the [`EstimateResult`] type and its associated structures
//! that capture everything produced when a selection is priced: per-field
//! validation errors, line items, totals, and the pricing trace.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validation messages keyed by selection field.
///
/// Messages for a field keep the order in which they were raised.
///
/// # Example
///
/// ```
/// use salon_estimator::models::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("hourlyDuration", "Duration (in hours) is required when an hourly service is selected.");
/// assert!(errors.contains("hourlyDuration"));
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty set of errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a message to a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns the messages for a field (empty if none).
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if the field has at least one message.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns true if no field has a message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields with messages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, messages)` in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// One priced entry contributing to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Display name of the category the item came from.
    pub category: String,
    /// Selection field key of that category.
    pub field: String,
    /// The chosen item's ID.
    pub item_id: String,
    /// The chosen item's display name.
    pub item_name: String,
    /// The resolved cost of this line.
    pub unit_cost: Decimal,
    /// Hours billed, for hourly lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
    /// Hourly rate applied, for hourly lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
}

/// A single step in the pricing trace.
///
/// Each step captures the input, output, and reasoning for one price lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The rule that produced the price (e.g. "hourly_rate").
    pub rule_id: String,
    /// The item that was priced.
    pub item_id: String,
    /// The inputs to the lookup.
    pub input: serde_json::Value,
    /// The outcome of the lookup.
    pub output: serde_json::Value,
    /// Human-readable explanation of the price.
    pub reasoning: String,
}

/// The result of pricing a selection.
///
/// Recomputed from scratch after every selection change; it is a pure function
/// of the catalog and the selection.
///
/// # Example
///
/// ```
/// use salon_estimator::models::{EstimateResult, FieldErrors};
///
/// let mut errors = FieldErrors::new();
/// errors.add("seniorityLevel", "Please select a stylist level.");
/// let result = EstimateResult::invalid(errors);
///
/// assert!(!result.is_valid);
/// assert!(result.line_items.is_empty());
/// assert_eq!(result.formatted_total(), "$0.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    /// Whether the selection passed every validation rule.
    pub is_valid: bool,
    /// Validation messages per field; empty when valid.
    pub field_errors: FieldErrors,
    /// Main service lines, in catalog category order.
    pub line_items: Vec<LineItem>,
    /// Add-on lines, in the order they were selected.
    pub add_on_items: Vec<LineItem>,
    /// Sum of all lines before the downpayment.
    pub subtotal: Decimal,
    /// Downpayment subtracted from the subtotal.
    pub downpayment: Decimal,
    /// Amount still owed; never negative.
    pub total_cost: Decimal,
    /// Pricing trace for every line.
    pub steps: Vec<PricingStep>,
}

impl EstimateResult {
    /// Builds the result for a selection that failed validation.
    ///
    /// No partial totals are reported for an invalid selection.
    pub fn invalid(field_errors: FieldErrors) -> Self {
        Self {
            is_valid: false,
            field_errors,
            line_items: Vec::new(),
            add_on_items: Vec::new(),
            subtotal: Decimal::ZERO,
            downpayment: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            steps: Vec::new(),
        }
    }

    /// Iterates over main service lines followed by add-on lines.
    pub fn all_items(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().chain(self.add_on_items.iter())
    }

    /// Returns the total formatted for display, e.g. `"$215.00"`.
    pub fn formatted_total(&self) -> String {
        crate::calculation::format_currency(self.total_cost)
    }
}
