//! Application state for the salon estimator API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::Catalog;
use crate::insight::{InsightProvider, StaticInsightProvider};

/// Shared application state.
///
/// Holds the frozen catalog and the insight provider. Selections are never
/// stored here: each request prices its own.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    insights: Arc<dyn InsightProvider>,
}

impl AppState {
    /// Creates state for the catalog with no insight service configured.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            insights: Arc::new(StaticInsightProvider::unavailable()),
        }
    }

    /// Replaces the insight provider.
    pub fn with_insight_provider(mut self, provider: Arc<dyn InsightProvider>) -> Self {
        self.insights = provider;
        self
    }

    /// Returns the loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns a shared handle to the catalog.
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Returns the insight provider.
    pub fn insights(&self) -> &dyn InsightProvider {
        self.insights.as_ref()
    }
}
