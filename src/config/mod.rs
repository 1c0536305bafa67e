//! Catalog loading and lookup for the salon estimator.
//!
//! This module loads the price list from a YAML or JSON file, checks it for
//! integrity problems, and exposes it as an immutable [`Catalog`].
//!
//! # Example
//!
//! ```no_run
//! use salon_estimator::config::Catalog;
//!
//! let catalog = Catalog::load("./config/salon/catalog.yaml").unwrap();
//! println!("Loaded {} categories", catalog.categories().len());
//! ```

mod catalog;
mod document;
mod field_key;
mod loader;

pub use catalog::{Catalog, CategoryKind, ServiceCategory, ServiceItem};
pub use document::{CatalogDocument, CategoryDocument, ItemDocument, PriceDocument, PriceKind};
pub use field_key::{
    ADD_ON_FIELD, DEFAULT_ADD_ON_CATEGORY, DOWNPAYMENT_FIELD, HOURLY_DURATION_FIELD,
    MAIN_SERVICE_FIELD, RESERVED_FIELDS, SENIORITY_LEVEL_FIELD, derive_field_key,
    is_reserved_field, resolve_field_key,
};
