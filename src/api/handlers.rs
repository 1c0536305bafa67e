//! HTTP request handlers for the salon estimator API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_estimate, price_label};
use crate::error::NEGATIVE_DOWNPAYMENT;
use crate::insight::{InsightRequest, insight_or_fallback};
use crate::models::Selection;

use super::request::{InsightBody, LabelQuery};
use super::response::{ApiError, ApiErrorResponse, EstimateResponse, ItemLabel};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/catalog", get(catalog_handler))
        .route("/catalog/labels", get(labels_handler))
        .route("/estimate", post(estimate_handler))
        .route("/insights", post(insights_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a JSON body rejection to a 400 error.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains(NEGATIVE_DOWNPAYMENT) {
                ApiError::new("INVALID_DOWNPAYMENT", body_text)
            } else if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for GET /catalog.
///
/// Returns the loaded catalog with derived field keys and price rules.
async fn catalog_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.catalog())
}

/// Handler for GET /catalog/labels.
///
/// Returns the badge text for every item at the requested level and duration.
async fn labels_handler(
    State(state): State<AppState>,
    query: Result<Query<LabelQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(error = %rejection, "Invalid label query");
            return error_response(ApiErrorResponse::bad_request(ApiError::invalid_query(
                rejection.body_text(),
            )));
        }
    };
    let level = match query.seniority_level() {
        Ok(level) => level,
        Err(err) => return error_response(err.into()),
    };

    let labels: Vec<ItemLabel> = state
        .catalog()
        .categories()
        .iter()
        .flat_map(|category| {
            category.items.iter().map(move |item| ItemLabel {
                category: category.name.clone(),
                field: category.field.clone(),
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                label: price_label(&item.price, level, query.duration),
            })
        })
        .collect();
    json_response(StatusCode::OK, labels)
}

/// Handler for POST /estimate.
///
/// Accepts a selection and returns its estimate. Incomplete selections are
/// answered with 200 and their field errors.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    let selection = match payload {
        Ok(Json(selection)) => selection,
        Err(rejection) => return error_response(json_rejection(correlation_id, rejection)),
    };

    let catalog = state.catalog();
    let start_time = Instant::now();
    match calculate_estimate(catalog, &selection) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                is_valid = result.is_valid,
                error_fields = result.field_errors.len(),
                total = %result.total_cost,
                duration_us = duration.as_micros(),
                "Estimate completed"
            );
            json_response(
                StatusCode::OK,
                EstimateResponse::new(result, catalog.version()),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Estimate failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /insights.
///
/// Always answers 200 for a complete request, substituting a fallback when
/// the insight service fails.
async fn insights_handler(
    State(state): State<AppState>,
    payload: Result<Json<InsightBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing insight request");

    let request: InsightRequest = match payload {
        Ok(Json(body)) => body.into(),
        Err(rejection) => return error_response(json_rejection(correlation_id, rejection)),
    };
    if let Some(field) = request.missing_field() {
        warn!(correlation_id = %correlation_id, field, "Incomplete insight request");
        return error_response(ApiErrorResponse::bad_request(ApiError::missing_field(field)));
    }

    let insight = insight_or_fallback(state.insights(), &request).await;
    info!(correlation_id = %correlation_id, "Insight completed");
    json_response(StatusCode::OK, insight)
}
