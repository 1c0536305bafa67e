//! The user's in-progress selection.
//!
//! A [`Selection`] is owned by exactly one estimate flow and mutated field by
//! field. Its wire form uses the catalog-derived field keys so that a
//! transmitted selection re-hydrates without translation:
//!
//! ```json
//! {
//!   "seniorityLevel": "Senior",
//!   "transformationPackage": "trans_noosa_blonde",
//!   "hairCutting": "cut_fringe",
//!   "addOns": ["addon_thick"],
//!   "hourlyDuration": "2",
//!   "downpayment": "15"
//! }
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::SeniorityLevel;

/// An amount the client has already paid. Never negative.
///
/// # Example
///
/// ```
/// use salon_estimator::models::Downpayment;
/// use rust_decimal::Decimal;
///
/// assert!(Downpayment::try_from(Decimal::from(15)).is_ok());
/// assert!(Downpayment::try_from(Decimal::from(-1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Downpayment(Decimal);

impl Downpayment {
    /// No downpayment.
    pub const ZERO: Downpayment = Downpayment(Decimal::ZERO);

    /// Returns the amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Downpayment {
    type Error = EngineError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(EngineError::InvalidDownpayment { amount });
        }
        Ok(Downpayment(amount))
    }
}

impl From<Downpayment> for Decimal {
    fn from(downpayment: Downpayment) -> Self {
        downpayment.0
    }
}

/// The choices made so far in one estimate flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// The stylist level, once chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_level: Option<SeniorityLevel>,
    /// Chosen add-on item IDs, in the order they were picked.
    #[serde(default)]
    pub add_ons: Vec<String>,
    /// Appointment length in hours, used by hourly services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_duration: Option<Decimal>,
    /// Amount already paid.
    #[serde(default)]
    pub downpayment: Downpayment,
    /// Chosen item ID per single-select category, keyed by category field key.
    #[serde(flatten)]
    pub services: BTreeMap<String, String>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the stylist level.
    pub fn set_seniority_level(&mut self, level: Option<SeniorityLevel>) {
        self.seniority_level = level;
    }

    /// Chooses an item for a single-select category. An empty ID clears it.
    pub fn select_service(&mut self, field: impl Into<String>, item_id: impl Into<String>) {
        let field = field.into();
        let item_id = item_id.into();
        if item_id.is_empty() {
            self.services.remove(&field);
        } else {
            self.services.insert(field, item_id);
        }
    }

    /// Clears the choice for a category, returning the previously chosen ID.
    pub fn clear_service(&mut self, field: &str) -> Option<String> {
        self.services.remove(field)
    }

    /// Returns the item chosen for a category field, if any.
    pub fn chosen_service(&self, field: &str) -> Option<&str> {
        self.services
            .get(field)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Iterates over `(field, item_id)` pairs that carry a choice.
    pub fn chosen_services(&self) -> impl Iterator<Item = (&str, &str)> {
        self.services
            .iter()
            .filter(|(_, id)| !id.is_empty())
            .map(|(field, id)| (field.as_str(), id.as_str()))
    }

    /// Returns true if at least one category carries a choice.
    pub fn has_chosen_services(&self) -> bool {
        self.chosen_services().next().is_some()
    }

    /// Adds an add-on. Returns false if it was already selected.
    pub fn add_add_on(&mut self, item_id: impl Into<String>) -> bool {
        let item_id = item_id.into();
        if self.add_ons.contains(&item_id) {
            return false;
        }
        self.add_ons.push(item_id);
        true
    }

    /// Removes an add-on. Returns false if it was not selected.
    pub fn remove_add_on(&mut self, item_id: &str) -> bool {
        let before = self.add_ons.len();
        self.add_ons.retain(|id| id != item_id);
        self.add_ons.len() != before
    }

    /// Flips an add-on on or off. Returns true if it is now selected.
    pub fn toggle_add_on(&mut self, item_id: &str) -> bool {
        if self.remove_add_on(item_id) {
            false
        } else {
            self.add_ons.push(item_id.to_string());
            true
        }
    }

    /// Sets or clears the hourly duration.
    pub fn set_hourly_duration(&mut self, hours: Option<Decimal>) {
        self.hourly_duration = hours;
    }

    /// Sets the downpayment.
    pub fn set_downpayment(&mut self, downpayment: Downpayment) {
        self.downpayment = downpayment;
    }

    /// Discards every choice.
    pub fn reset(&mut self) {
        *self = Selection::default();
    }
}
