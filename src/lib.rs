//! Salon Service Price Estimator
//!
//! This crate prices salon appointments from a static catalog of services,
//! add-ons and stylist seniority levels. A caller builds up a
//! [`Selection`](models::Selection) field by field and recomputes an
//! [`EstimateResult`](models::EstimateResult) after every change, either
//! directly with [`calculation::calculate_estimate`] or through an
//! [`EstimateSession`](session::EstimateSession).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod insight;
pub mod models;
pub mod session;

#[cfg(test)]
mod test_support;
