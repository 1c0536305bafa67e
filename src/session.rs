//! Per-user estimate sessions.
//!
//! An [`EstimateSession`] owns one in-progress [`Selection`] and the
//! [`EstimateResult`] computed from it. Every mutation recomputes the
//! estimate before returning, so the two are never out of step.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::calculation::calculate_estimate;
use crate::config::Catalog;
use crate::error::EngineResult;
use crate::models::{Downpayment, EstimateResult, Selection, SeniorityLevel};

/// A single in-progress estimate against a shared catalog.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use salon_estimator::config::Catalog;
/// use salon_estimator::models::SeniorityLevel;
/// use salon_estimator::session::EstimateSession;
///
/// let catalog = Arc::new(Catalog::from_yaml_str(r#"
/// seniorityLevels: [Senior]
/// addOnCategory: Extras
/// services:
///   - category: Cut
///     items:
///       - { id: A, name: Cut A, price: { type: fixed, base: 20 } }
///   - category: Extras
///     items:
///       - { id: C, name: Add-on C, price: { type: fixed, base: 10 } }
/// "#).unwrap());
///
/// let mut session = EstimateSession::new(catalog)?;
/// assert!(!session.estimate().is_valid);
///
/// session.set_seniority_level(Some(SeniorityLevel::Senior))?;
/// session.select_service("cut", "A")?;
/// assert_eq!(session.estimate().formatted_total(), "$20.00");
/// # Ok::<(), salon_estimator::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EstimateSession {
    catalog: Arc<Catalog>,
    selection: Selection,
    estimate: EstimateResult,
}

impl EstimateSession {
    /// Starts a session with an empty selection.
    pub fn new(catalog: Arc<Catalog>) -> EngineResult<Self> {
        Self::with_selection(catalog, Selection::new())
    }

    /// Starts a session from a rehydrated selection.
    pub fn with_selection(catalog: Arc<Catalog>, selection: Selection) -> EngineResult<Self> {
        let estimate = calculate_estimate(&catalog, &selection)?;
        Ok(Self {
            catalog,
            selection,
            estimate,
        })
    }

    /// Returns the catalog the session prices against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the estimate for the current selection.
    pub fn estimate(&self) -> &EstimateResult {
        &self.estimate
    }

    /// Applies a change to the selection and recomputes the estimate.
    ///
    /// The change is committed only if pricing succeeds; on error the
    /// session keeps its previous selection and estimate.
    pub fn update<F>(&mut self, change: F) -> EngineResult<&EstimateResult>
    where
        F: FnOnce(&mut Selection),
    {
        let mut selection = self.selection.clone();
        change(&mut selection);
        let estimate = calculate_estimate(&self.catalog, &selection)?;
        self.selection = selection;
        self.estimate = estimate;
        Ok(&self.estimate)
    }

    /// Sets or clears the stylist level.
    pub fn set_seniority_level(
        &mut self,
        level: Option<SeniorityLevel>,
    ) -> EngineResult<&EstimateResult> {
        self.update(|s| s.set_seniority_level(level))
    }

    /// Chooses an item for a category field. An empty ID clears the choice.
    pub fn select_service(&mut self, field: &str, item_id: &str) -> EngineResult<&EstimateResult> {
        self.update(|s| s.select_service(field, item_id))
    }

    /// Clears the choice for a category field.
    pub fn clear_service(&mut self, field: &str) -> EngineResult<&EstimateResult> {
        self.update(|s| {
            s.clear_service(field);
        })
    }

    /// Flips an add-on on or off.
    pub fn toggle_add_on(&mut self, item_id: &str) -> EngineResult<&EstimateResult> {
        self.update(|s| {
            s.toggle_add_on(item_id);
        })
    }

    /// Sets or clears the hourly duration.
    pub fn set_hourly_duration(&mut self, hours: Option<Decimal>) -> EngineResult<&EstimateResult> {
        self.update(|s| s.set_hourly_duration(hours))
    }

    /// Sets the downpayment.
    pub fn set_downpayment(&mut self, downpayment: Downpayment) -> EngineResult<&EstimateResult> {
        self.update(|s| s.set_downpayment(downpayment))
    }

    /// Discards every choice.
    pub fn reset(&mut self) -> EngineResult<&EstimateResult> {
        self.update(Selection::reset)
    }

    /// Ends the session, returning the selection for persistence or transmission.
    pub fn into_selection(self) -> Selection {
        self.selection
    }
}
