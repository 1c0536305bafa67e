//! Catalog loading functionality.
//!
//! This module reads catalog documents from YAML or JSON, lowers raw price
//! entries into [`PriceRule`]s, and refuses to build a [`Catalog`] that fails
//! any integrity check.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{PriceRule, SeniorityLevel};

use super::catalog::{Catalog, CategoryKind, ServiceCategory, ServiceItem};
use super::document::{CatalogDocument, ItemDocument, PriceDocument, PriceKind};
use super::field_key::{ADD_ON_FIELD, DEFAULT_ADD_ON_CATEGORY, is_reserved_field, resolve_field_key};

impl Catalog {
    /// Loads a catalog from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Returns
    ///
    /// Returns the catalog on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file is not a catalog document (`ConfigParseError`)
    /// - The catalog fails an integrity check (`CatalogIntegrity`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salon_estimator::config::Catalog;
    ///
    /// let catalog = Catalog::load("./config/salon/catalog.yaml")?;
    /// println!("{} items", catalog.item_count());
    /// # Ok::<(), salon_estimator::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let document = if is_json {
            parse_json(&content, &path_str)?
        } else {
            parse_yaml(&content, &path_str)?
        };

        let catalog = Self::from_document(document)?;
        info!(
            path = %path_str,
            version = catalog.version().unwrap_or("unversioned"),
            categories = catalog.categories().len(),
            items = catalog.item_count(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses and validates a YAML catalog document.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::from_document(parse_yaml(content, "<yaml>")?)
    }

    /// Parses and validates a JSON catalog document.
    pub fn from_json_str(content: &str) -> EngineResult<Self> {
        Self::from_document(parse_json(content, "<json>")?)
    }

    /// Lowers and validates a parsed catalog document.
    ///
    /// Every integrity problem is logged and collected; if there are any, the
    /// catalog is rejected as a whole.
    pub fn from_document(document: CatalogDocument) -> EngineResult<Self> {
        let mut issues = Vec::new();

        if document.seniority_levels.is_empty() {
            issues.push("catalog offers no seniority levels".to_string());
        }
        let mut seen_levels = HashSet::new();
        for level in &document.seniority_levels {
            if !seen_levels.insert(*level) {
                issues.push(format!("seniority level {} is listed more than once", level));
            }
        }

        let add_on_name = document
            .add_on_category
            .clone()
            .unwrap_or_else(|| DEFAULT_ADD_ON_CATEGORY.to_string());

        let mut categories = Vec::with_capacity(document.services.len());
        let mut category_names = HashSet::new();
        let mut fields: HashMap<String, String> = HashMap::new();
        let mut item_owners: HashMap<String, String> = HashMap::new();
        let mut add_on_index = None;

        for category_doc in document.services {
            let name = category_doc.category;
            if !category_names.insert(name.clone()) {
                issues.push(format!("category '{}' is defined more than once", name));
            }

            let is_add_on = name == add_on_name;
            let field = match (&category_doc.field, is_add_on) {
                (Some(field), true) if field != ADD_ON_FIELD => {
                    issues.push(format!(
                        "add-on category '{}' must use field '{}', not '{}'",
                        name, ADD_ON_FIELD, field
                    ));
                    ADD_ON_FIELD.to_string()
                }
                (Some(field), _) => field.clone(),
                (None, _) => resolve_field_key(&name, &add_on_name),
            };

            if field.is_empty() {
                issues.push(format!("category '{}' resolves to an empty field key", name));
            } else if !is_add_on && is_reserved_field(&field) {
                issues.push(format!(
                    "category '{}' resolves to reserved field key '{}'",
                    name, field
                ));
            } else if let Some(other) = fields.insert(field.clone(), name.clone()) {
                if other != name {
                    issues.push(format!(
                        "categories '{}' and '{}' both resolve to field key '{}'",
                        other, name, field
                    ));
                }
            }

            if category_doc.items.is_empty() {
                issues.push(format!("category '{}' has no items", name));
            }

            let mut items = Vec::with_capacity(category_doc.items.len());
            for item_doc in category_doc.items {
                if item_doc.id.trim().is_empty() {
                    issues.push(format!("category '{}' has an item with an empty id", name));
                } else if let Some(owner) = item_owners.insert(item_doc.id.clone(), name.clone())
                {
                    issues.push(format!(
                        "item id '{}' appears in both '{}' and '{}'",
                        item_doc.id, owner, name
                    ));
                }
                if let Some(item) = lower_item(item_doc, &document.seniority_levels, &mut issues) {
                    items.push(item);
                }
            }

            if is_add_on {
                add_on_index = Some(categories.len());
            }
            categories.push(ServiceCategory {
                name,
                description: category_doc.description,
                field,
                kind: if is_add_on {
                    CategoryKind::AddOnMultiSelect
                } else {
                    CategoryKind::SingleSelect
                },
                items,
            });
        }

        let Some(add_on_index) = add_on_index else {
            issues.push(format!("add-on category '{}' not found", add_on_name));
            return Err(reject(issues));
        };

        if !issues.is_empty() {
            return Err(reject(issues));
        }

        Ok(Catalog::assemble(
            document.version,
            document.seniority_levels,
            categories,
            add_on_index,
        ))
    }
}

fn parse_yaml(content: &str, source: &str) -> EngineResult<CatalogDocument> {
    serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
        path: source.to_string(),
        message: e.to_string(),
    })
}

fn parse_json(content: &str, source: &str) -> EngineResult<CatalogDocument> {
    serde_json::from_str(content).map_err(|e| EngineError::ConfigParseError {
        path: source.to_string(),
        message: e.to_string(),
    })
}

fn reject(issues: Vec<String>) -> EngineError {
    for issue in &issues {
        error!(issue = %issue, "Catalog integrity violation");
    }
    EngineError::CatalogIntegrity { issues }
}

/// Lowers an item, recording problems instead of failing fast.
fn lower_item(
    item: ItemDocument,
    levels: &[SeniorityLevel],
    issues: &mut Vec<String>,
) -> Option<ServiceItem> {
    let price = lower_price(&item.id, item.price, issues)?;

    if let Some(amount) = price.amounts().find(|amount| *amount < Decimal::ZERO) {
        issues.push(format!("item '{}' has negative amount {}", item.id, amount));
    }
    if !levels.is_empty() && !is_priced_for_any(&price, levels) {
        issues.push(format!(
            "item '{}' is not priced for any offered seniority level",
            item.id
        ));
    }

    Some(ServiceItem {
        id: item.id,
        name: item.name,
        price,
        notes: item.notes,
    })
}

/// Turns a raw price entry into a rule.
///
/// A `fixed` entry carrying only per-level prices is a level lookup without
/// a fallback, so it lowers to [`PriceRule::FromLevel`].
fn lower_price(item_id: &str, price: PriceDocument, issues: &mut Vec<String>) -> Option<PriceRule> {
    match price.kind {
        PriceKind::Fixed => match (price.base, price.levels) {
            (Some(amount), None) => Some(PriceRule::Fixed { amount }),
            (None, Some(levels)) => {
                debug!(item_id, "Fixed price with per-level amounts lowered to a level lookup");
                Some(PriceRule::FromLevel {
                    levels,
                    fallback: None,
                })
            }
            (Some(_), Some(_)) => {
                issues.push(format!(
                    "item '{}' has a fixed price with both base and levels",
                    item_id
                ));
                None
            }
            (None, None) => {
                issues.push(format!("item '{}' has a fixed price with no amount", item_id));
                None
            }
        },
        PriceKind::Hourly => match price.rates {
            Some(rates) if !rates.is_empty() => Some(PriceRule::Hourly { rates }),
            _ => {
                issues.push(format!("item '{}' has an hourly price with no rates", item_id));
                None
            }
        },
        PriceKind::From => {
            if price.levels.is_none() && price.base.is_none() {
                issues.push(format!(
                    "item '{}' has a from price with neither levels nor base",
                    item_id
                ));
                return None;
            }
            Some(PriceRule::FromLevel {
                levels: price.levels.unwrap_or_default(),
                fallback: price.base,
            })
        }
    }
}

fn is_priced_for_any(price: &PriceRule, levels: &[SeniorityLevel]) -> bool {
    match price {
        PriceRule::Fixed { .. } => true,
        PriceRule::Hourly { rates } => levels.iter().any(|l| rates.contains_key(l)),
        PriceRule::FromLevel { levels: by_level, fallback } => {
            fallback.is_some() || levels.iter().any(|l| matches!(by_level.get(l), Some(Some(_))))
        }
    }
}
