//! Core data models for the salon estimator.
//!
//! This module contains all the domain models used throughout the engine.

mod estimate;
mod price_rule;
mod selection;
mod seniority;

pub use estimate::{EstimateResult, FieldErrors, LineItem, PricingStep};
pub use price_rule::PriceRule;
pub use selection::{Downpayment, Selection};
pub use seniority::SeniorityLevel;
