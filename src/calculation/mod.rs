//! Pricing logic for the salon estimator.
//!
//! This module contains everything between a [`Selection`](crate::models::Selection)
//! and its [`EstimateResult`](crate::models::EstimateResult): price rule
//! evaluation, selection validation, total aggregation, and the display
//! helpers used to present amounts.

mod aggregation;
mod formatting;
mod price_evaluation;
mod validation;

pub use aggregation::calculate_estimate;
pub use formatting::{estimate_summary, format_currency, price_label, round_to_cents};
pub use price_evaluation::{
    PriceBasis, PriceOutcome, ResolvedPrice, Unavailable, evaluate_add_on_price, evaluate_price,
    is_offered_at,
};
pub use validation::{DURATION_TOO_LARGE, validate_selection};
