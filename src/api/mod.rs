//! HTTP API module for the salon estimator.
//!
//! This module provides the REST endpoints for browsing the catalog,
//! pricing selections, and requesting consultation insights.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{InsightBody, LabelQuery};
pub use response::{ApiError, EstimateResponse, ItemLabel};
pub use state::AppState;
