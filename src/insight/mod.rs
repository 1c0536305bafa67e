//! Advisory insight collaborator.
//!
//! Stylists can ask for a short insight on a consultation question. The text
//! comes from a remote service behind the [`InsightProvider`] trait; the
//! pricing flow never waits on it and never sees its errors.
//!
//! # Architecture
//!
//! - `InsightProvider` trait: one async request/response call
//! - `HttpInsightClient`: posts to a remote insight service over HTTP
//! - `StaticInsightProvider`: fixed answers for offline use and tests
//! - `insight_or_fallback`: turns every failure into a presentable string

mod http;

pub use http::{DEFAULT_TIMEOUT, HttpInsightClient};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Shown when the insight service fails or times out.
pub const INSIGHT_UNAVAILABLE: &str = "Unable to fetch insight at the moment.";

/// Shown when the insight service answers with empty text.
pub const NO_INSIGHT_GENERATED: &str = "No insight generated.";

/// A consultation question and the context it was asked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRequest {
    /// The question put to the client.
    pub question: String,
    /// What the client answered or what is known so far.
    pub context: String,
}

impl InsightRequest {
    /// Creates a request.
    pub fn new(question: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            context: context.into(),
        }
    }

    /// Returns the name of the first blank field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.question.trim().is_empty() {
            Some("question")
        } else if self.context.trim().is_empty() {
            Some("context")
        } else {
            None
        }
    }
}

/// A short advisory answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// The advisory text.
    pub insight: String,
    /// An optional question to ask next.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl Insight {
    /// Creates an insight without a follow-up.
    pub fn new(insight: impl Into<String>) -> Self {
        Self {
            insight: insight.into(),
            follow_up: None,
        }
    }
}

/// Failures talking to the insight service.
#[derive(Debug, Error)]
pub enum InsightError {
    /// The request had a blank field.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// The service did not answer in time.
    #[error("Insight service timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("Insight service returned status {0}")]
    Status(u16),

    /// The connection failed.
    #[error("Insight service unreachable: {0}")]
    Transport(String),

    /// The body was not an insight document.
    #[error("Malformed insight response: {0}")]
    Decode(String),

    /// No insight is configured.
    #[error("Insight service not configured")]
    NotConfigured,
}

/// Source of advisory insights.
///
/// Implementations must be `Send + Sync` so one provider can be shared by
/// every request handler.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Asks for an insight on the question.
    async fn insight(&self, request: &InsightRequest) -> Result<Insight, InsightError>;
}

/// Asks for an insight, substituting a fallback string on any failure.
///
/// Never fails: errors become [`INSIGHT_UNAVAILABLE`] and blank answers
/// become [`NO_INSIGHT_GENERATED`].
pub async fn insight_or_fallback(provider: &dyn InsightProvider, request: &InsightRequest) -> Insight {
    match provider.insight(request).await {
        Ok(insight) if insight.insight.trim().is_empty() => Insight {
            insight: NO_INSIGHT_GENERATED.to_string(),
            follow_up: insight.follow_up,
        },
        Ok(insight) => insight,
        Err(e) => {
            warn!(error = %e, "Insight unavailable, using fallback");
            Insight::new(INSIGHT_UNAVAILABLE)
        }
    }
}

/// Answers every question with the same text, or with an error if none is set.
#[derive(Debug, Clone, Default)]
pub struct StaticInsightProvider {
    answer: Option<Insight>,
}

impl StaticInsightProvider {
    /// Always answers with the insight.
    pub fn new(answer: Insight) -> Self {
        Self {
            answer: Some(answer),
        }
    }

    /// Always fails with [`InsightError::NotConfigured`].
    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InsightProvider for StaticInsightProvider {
    async fn insight(&self, request: &InsightRequest) -> Result<Insight, InsightError> {
        if let Some(field) = request.missing_field() {
            return Err(InsightError::MissingField(field));
        }
        self.answer.clone().ok_or(InsightError::NotConfigured)
    }
}
