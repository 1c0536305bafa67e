//! Request types for the salon estimator API.
//!
//! `POST /estimate` takes a [`Selection`](crate::models::Selection) body
//! directly; the types here cover the other endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::insight::InsightRequest;
use crate::models::SeniorityLevel;

/// Query string for `GET /catalog/labels`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelQuery {
    /// Stylist level, case-insensitive.
    #[serde(default)]
    pub level: Option<String>,
    /// Appointment duration in hours.
    #[serde(default)]
    pub duration: Option<Decimal>,
}

impl LabelQuery {
    /// Parses the level, treating a blank value as absent.
    pub fn seniority_level(&self) -> EngineResult<Option<SeniorityLevel>> {
        match self.level.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(level) => level.parse().map(Some),
        }
    }
}

/// Request body for `POST /insights`.
///
/// Both fields default to empty so that a missing field is reported the
/// same way as a blank one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightBody {
    /// The consultation question.
    #[serde(default)]
    pub question: String,
    /// The client's answer or other context.
    #[serde(default)]
    pub context: String,
}

impl From<InsightBody> for InsightRequest {
    fn from(body: InsightBody) -> Self {
        InsightRequest::new(body.question, body.context)
    }
}
