//! HTTP insight client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{Insight, InsightError, InsightProvider, InsightRequest};

/// Default time allowed for the insight service to answer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Client for a remote insight service.
///
/// Posts `{question, context}` as JSON to `{base_url}/api/insights` and
/// expects `{insight, follow_up?}` back.
#[derive(Debug, Clone)]
pub struct HttpInsightClient {
    http_client: Client,
    endpoint: String,
}

impl HttpInsightClient {
    /// Creates a client with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InsightError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InsightError::Transport(e.to_string()))?;
        Ok(Self {
            http_client,
            endpoint: format!("{}/api/insights", base_url.trim_end_matches('/')),
        })
    }

    /// Returns the URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(e: reqwest::Error) -> InsightError {
    if e.is_timeout() {
        InsightError::Timeout
    } else {
        InsightError::Transport(e.to_string())
    }
}

#[async_trait]
impl InsightProvider for HttpInsightClient {
    async fn insight(&self, request: &InsightRequest) -> Result<Insight, InsightError> {
        if let Some(field) = request.missing_field() {
            return Err(InsightError::MissingField(field));
        }

        debug!(endpoint = %self.endpoint, "Requesting insight");
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(InsightError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| InsightError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = HttpInsightClient::new("http://localhost:3000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/api/insights");
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected_without_a_request() {
        let client = HttpInsightClient::new("http://127.0.0.1:9", DEFAULT_TIMEOUT).unwrap();
        let result = client.insight(&InsightRequest::new("", "context")).await;
        assert!(matches!(result, Err(InsightError::MissingField("question"))));
    }
}
