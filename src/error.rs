//! Error types for the salon estimator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading a catalog or
//! pricing a selection. Per-field validation problems are not errors: they
//! are returned as data in [`FieldErrors`](crate::models::FieldErrors).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::SeniorityLevel;

/// Leading text of the [`EngineError::InvalidDownpayment`] message.
///
/// Serde surfaces intake errors only as text, so the HTTP layer matches on
/// this prefix to recognise a rejected downpayment.
pub const NEGATIVE_DOWNPAYMENT: &str = "Downpayment cannot be negative";

/// The main error type for the salon estimator.
///
/// # Example
///
/// ```
/// use salon_estimator::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/catalog.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Catalog file not found: /missing/catalog.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog file was not found at the specified path.
    #[error("Catalog file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Catalog file could not be parsed.
    #[error("Failed to parse catalog '{path}': {message}")]
    ConfigParseError {
        /// The path (or source label) that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The catalog parsed but is not safe to price against.
    #[error("Catalog integrity check failed: {}", issues.join("; "))]
    CatalogIntegrity {
        /// Every problem found, in discovery order.
        issues: Vec<String>,
    },

    /// A negative downpayment was supplied.
    #[error("{}: {amount}", NEGATIVE_DOWNPAYMENT)]
    InvalidDownpayment {
        /// The rejected amount.
        amount: Decimal,
    },

    /// A seniority level string outside the known set.
    #[error("Unknown seniority level: {value}")]
    UnknownSeniorityLevel {
        /// The unrecognised value.
        value: String,
    },

    /// A price could not be resolved for an item that already passed validation.
    ///
    /// This indicates a bug in the validator, never a user mistake.
    #[error("Price unavailable for item '{item_id}' at level {level} after validation: {reason}")]
    UnavailablePrice {
        /// The item whose price could not be resolved.
        item_id: String,
        /// The seniority level used for the lookup.
        level: SeniorityLevel,
        /// Why the evaluator reported the price as unavailable.
        reason: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
