//! The immutable pricing catalog.
//!
//! A [`Catalog`] is built once from a catalog document (see
//! [`Catalog::load`]) and only read afterwards. Share it between sessions
//! with an `Arc`.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{PriceRule, SeniorityLevel};

use super::field_key::resolve_field_key;

/// Whether a category allows one item or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// At most one item may be chosen.
    SingleSelect,
    /// Any number of add-ons may be chosen alongside a main service.
    AddOnMultiSelect,
}

/// A priced service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceItem {
    /// Catalog-wide unique ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// How the item is priced.
    pub price: PriceRule,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A group of services presented together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCategory {
    /// Display name.
    pub name: String,
    /// Description shown under the category.
    pub description: String,
    /// Selection field key for this category.
    pub field: String,
    /// Single-select or add-on.
    pub kind: CategoryKind,
    /// Items in display order.
    pub items: Vec<ServiceItem>,
}

impl ServiceCategory {
    /// Returns true if this is the add-on category.
    pub fn is_add_on(&self) -> bool {
        self.kind == CategoryKind::AddOnMultiSelect
    }

    /// Finds an item of this category by ID.
    pub fn item(&self, item_id: &str) -> Option<&ServiceItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

#[derive(Debug, Clone, Copy)]
struct ItemLocation {
    category: usize,
    item: usize,
}

/// The complete, validated price list.
///
/// # Example
///
/// ```
/// use salon_estimator::config::Catalog;
///
/// let catalog = Catalog::from_yaml_str(r#"
/// seniorityLevels: [Senior]
/// addOnCategory: Extras
/// services:
///   - category: Hair Cutting
///     items:
///       - { id: cut_fringe, name: Fringe trim, price: { type: fixed, base: 20 } }
///   - category: Extras
///     items:
///       - { id: gloss, name: Clear gloss, price: { type: fixed, base: 20 } }
/// "#).unwrap();
///
/// assert_eq!(catalog.resolve_category_field("Hair Cutting"), "hairCutting");
/// assert_eq!(catalog.resolve_category_field("Extras"), "addOns");
/// assert_eq!(catalog.find_item("gloss").unwrap().name, "Clear gloss");
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    version: Option<String>,
    seniority_levels: Vec<SeniorityLevel>,
    categories: Vec<ServiceCategory>,
    #[serde(skip)]
    add_on_category: usize,
    #[serde(skip)]
    items_by_id: HashMap<String, ItemLocation>,
    #[serde(skip)]
    categories_by_field: HashMap<String, usize>,
}

impl Catalog {
    /// Assembles a catalog from categories that already passed integrity checks.
    pub(super) fn assemble(
        version: Option<String>,
        seniority_levels: Vec<SeniorityLevel>,
        categories: Vec<ServiceCategory>,
        add_on_category: usize,
    ) -> Self {
        let mut items_by_id = HashMap::new();
        let mut categories_by_field = HashMap::new();
        for (ci, category) in categories.iter().enumerate() {
            categories_by_field.insert(category.field.clone(), ci);
            for (ii, item) in category.items.iter().enumerate() {
                items_by_id.insert(
                    item.id.clone(),
                    ItemLocation {
                        category: ci,
                        item: ii,
                    },
                );
            }
        }
        Self {
            version,
            seniority_levels,
            categories,
            add_on_category,
            items_by_id,
            categories_by_field,
        }
    }

    /// Returns the catalog version label, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the offered seniority levels in display order.
    pub fn seniority_levels(&self) -> &[SeniorityLevel] {
        &self.seniority_levels
    }

    /// Returns true if the salon offers the level.
    pub fn offers_level(&self, level: SeniorityLevel) -> bool {
        self.seniority_levels.contains(&level)
    }

    /// Returns every category in display order.
    pub fn categories(&self) -> &[ServiceCategory] {
        &self.categories
    }

    /// Returns the single-select categories in display order.
    pub fn main_categories(&self) -> impl Iterator<Item = &ServiceCategory> {
        self.categories.iter().filter(|c| !c.is_add_on())
    }

    /// Returns the add-on category.
    pub fn add_on_category(&self) -> &ServiceCategory {
        &self.categories[self.add_on_category]
    }

    /// Finds a category by its display name.
    pub fn category_by_name(&self, name: &str) -> Option<&ServiceCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Finds a category by its selection field key.
    pub fn category_by_field(&self, field: &str) -> Option<&ServiceCategory> {
        self.categories_by_field
            .get(field)
            .map(|&index| &self.categories[index])
    }

    /// Maps a category name to its selection field key.
    ///
    /// Categories in the catalog answer with their stored key (which may be
    /// catalog-authored). Unknown names fall back to the generic derivation,
    /// with the add-on category name mapping to `addOns`.
    pub fn resolve_category_field(&self, category_name: &str) -> String {
        match self.category_by_name(category_name) {
            Some(category) => category.field.clone(),
            None => resolve_field_key(category_name, &self.add_on_category().name),
        }
    }

    /// Finds an item by ID across all categories.
    pub fn find_item(&self, item_id: &str) -> Option<&ServiceItem> {
        self.locate_item(item_id).map(|(_, item)| item)
    }

    /// Finds an item by ID together with the category that owns it.
    pub fn locate_item(&self, item_id: &str) -> Option<(&ServiceCategory, &ServiceItem)> {
        let location = self.items_by_id.get(item_id)?;
        let category = &self.categories[location.category];
        Some((category, &category.items[location.item]))
    }

    /// Returns the number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.items_by_id.len()
    }
}
