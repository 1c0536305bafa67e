//! Category name to selection field key mapping.
//!
//! Selection fields are keyed by a camel-cased form of the category name
//! ("Hair Cutting" becomes `hairCutting`). The add-on category is the one
//! exception: it always maps to [`ADD_ON_FIELD`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Field key reserved for the add-on category.
pub const ADD_ON_FIELD: &str = "addOns";

/// Field key for the stylist level.
pub const SENIORITY_LEVEL_FIELD: &str = "seniorityLevel";

/// Field key for the appointment duration of hourly services.
pub const HOURLY_DURATION_FIELD: &str = "hourlyDuration";

/// Field key for the downpayment.
pub const DOWNPAYMENT_FIELD: &str = "downpayment";

/// Field key for errors about the main services as a whole.
pub const MAIN_SERVICE_FIELD: &str = "services";

/// Keys no single-select category may derive to.
pub const RESERVED_FIELDS: [&str; 5] = [
    SENIORITY_LEVEL_FIELD,
    ADD_ON_FIELD,
    HOURLY_DURATION_FIELD,
    DOWNPAYMENT_FIELD,
    MAIN_SERVICE_FIELD,
];

/// Name of the add-on category when the catalog does not name one.
pub const DEFAULT_ADD_ON_CATEGORY: &str = "Foil Package Add On's";

// Each run of non-alphanumerics swallows the following character, which is upper-cased.
static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9]+(.)").expect("word boundary pattern is valid")
});

/// Derives the generic field key for a category name.
///
/// # Example
///
/// ```
/// use salon_estimator::config::derive_field_key;
///
/// assert_eq!(derive_field_key("Global Gloss Hair Colour"), "globalGlossHairColour");
/// assert_eq!(derive_field_key("Foil Package Add On's"), "foilPackageAddOnS");
/// ```
pub fn derive_field_key(category_name: &str) -> String {
    let lowered = category_name.to_lowercase();
    WORD_BOUNDARY
        .replace_all(&lowered, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Resolves the field key for a category, applying the add-on override.
///
/// The override wins even when another category's generic key would
/// coincide with it.
pub fn resolve_field_key(category_name: &str, add_on_category: &str) -> String {
    if category_name == add_on_category {
        ADD_ON_FIELD.to_string()
    } else {
        derive_field_key(category_name)
    }
}

/// Returns true if the key is reserved for a non-category selection field.
pub fn is_reserved_field(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}
