//! Response types for the salon estimator API.
//!
//! This module defines the success envelopes, the error response
//! structures and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::format_currency;
use crate::error::EngineError;
use crate::models::{EstimateResult, SeniorityLevel};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a malformed query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }

    /// Creates a missing field error response.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_details(
            "MISSING_FIELD",
            format!("missing field: {}", field),
            format!("Required field '{}' was blank or not provided", field),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body as a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::CatalogIntegrity { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Catalog error", message),
            },
            EngineError::InvalidDownpayment { .. } => ApiErrorResponse::bad_request(
                ApiError::new("INVALID_DOWNPAYMENT", message),
            ),
            EngineError::UnknownSeniorityLevel { .. } => {
                let expected: Vec<&str> = SeniorityLevel::ALL.iter().map(|l| l.as_str()).collect();
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "UNKNOWN_SENIORITY_LEVEL",
                    message,
                    format!("Expected one of: {}", expected.join(", ")),
                ))
            }
            EngineError::UnavailablePrice { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "UNAVAILABLE_PRICE",
                    "Estimate could not be priced",
                    message,
                ),
            },
        }
    }
}

/// Response body for `POST /estimate`.
///
/// Wraps the engine's [`EstimateResult`] with request metadata. Invalid
/// selections are still a 200: their field errors are part of the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    /// Unique identifier for this response.
    pub estimate_id: Uuid,
    /// When the estimate was computed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that priced it.
    pub engine_version: String,
    /// Version label of the catalog it was priced against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,
    /// The total formatted for display.
    pub formatted_total: String,
    /// The estimate itself.
    #[serde(flatten)]
    pub result: EstimateResult,
}

impl EstimateResponse {
    /// Wraps a result with fresh metadata.
    pub fn new(result: EstimateResult, catalog_version: Option<&str>) -> Self {
        Self {
            estimate_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            catalog_version: catalog_version.map(str::to_string),
            formatted_total: format_currency(result.total_cost),
            result,
        }
    }
}

/// One entry of `GET /catalog/labels`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLabel {
    /// Category display name.
    pub category: String,
    /// Category selection field key.
    pub field: String,
    /// Item ID.
    pub item_id: String,
    /// Item display name.
    pub item_name: String,
    /// Badge text for the requested level and duration.
    pub label: String,
}
