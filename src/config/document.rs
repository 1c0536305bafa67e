//! Catalog intake types.
//!
//! This module contains the structures deserialized from a catalog file,
//! before any lowering or integrity checking. The shape matches existing
//! catalog data:
//!
//! ```yaml
//! seniorityLevels: [Junior, Intermediate, Senior]
//! services:
//!   - category: Hair Cutting
//!     description: Cuts across all Levels.
//!     items:
//!       - id: cut_fringe
//!         name: Fringe trim
//!         price: { type: fixed, base: 20 }
//!         notes: null
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::SeniorityLevel;

/// A complete catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    /// Optional version label for the price list.
    #[serde(default)]
    pub version: Option<String>,
    /// Levels offered by the salon, in display order.
    pub seniority_levels: Vec<SeniorityLevel>,
    /// Name of the add-on category; defaults to
    /// [`DEFAULT_ADD_ON_CATEGORY`](super::DEFAULT_ADD_ON_CATEGORY).
    #[serde(default)]
    pub add_on_category: Option<String>,
    /// Service categories, in display order.
    pub services: Vec<CategoryDocument>,
}

/// A service category as written in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDocument {
    /// Display name of the category.
    pub category: String,
    /// Description shown under the category.
    #[serde(default)]
    pub description: String,
    /// Explicit selection field key; derived from the name when absent.
    #[serde(default)]
    pub field: Option<String>,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<ItemDocument>,
}

/// A service item as written in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDocument {
    /// Catalog-wide unique ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Raw price description.
    pub price: PriceDocument,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// The intake price type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    /// Flat price.
    Fixed,
    /// Per-hour price by level.
    Hourly,
    /// "Starting at" price.
    From,
}

/// A raw price entry. Which fields are meaningful depends on `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDocument {
    /// The price type.
    #[serde(rename = "type")]
    pub kind: PriceKind,
    /// Flat amount (`fixed`) or fallback starting price (`from`).
    #[serde(default)]
    pub base: Option<Decimal>,
    /// Hourly rates per level (`hourly`).
    #[serde(default)]
    pub rates: Option<BTreeMap<SeniorityLevel, Decimal>>,
    /// Level-specific prices; `null` marks a level without a price.
    #[serde(default)]
    pub levels: Option<BTreeMap<SeniorityLevel, Option<Decimal>>>,
}
