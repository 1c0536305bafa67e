//! Selection validation.
//!
//! This module decides whether a [`Selection`] is complete and consistent
//! enough to price, and produces per-field messages when it is not. It never
//! fails and never mutates the selection.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::config::{
    ADD_ON_FIELD, Catalog, HOURLY_DURATION_FIELD, MAIN_SERVICE_FIELD, SENIORITY_LEVEL_FIELD,
};
use crate::models::{FieldErrors, PriceRule, Selection, SeniorityLevel};

use super::price_evaluation::{PriceOutcome, Unavailable, evaluate_price, is_offered_at};

/// Reported on `hourlyDuration` when the duration cannot be priced.
pub const DURATION_TOO_LARGE: &str = "Duration is too large.";

/// Validates a selection against the catalog.
///
/// Returns an empty [`FieldErrors`] when the selection can be priced.
///
/// # Rules
///
/// 1. A stylist level offered by the catalog is chosen.
/// 2. At least one main (single-select) service is chosen.
/// 3. Every chosen ID exists, belongs to the field it was chosen under, and
///    is priced at the chosen level.
/// 4. Add-ons only accompany a main service, and each appears once.
/// 5. A positive duration is set whenever an hourly main service is chosen,
///    and it is small enough to price.
///
/// # Example
///
/// ```
/// use salon_estimator::calculation::validate_selection;
/// use salon_estimator::config::Catalog;
/// use salon_estimator::models::Selection;
///
/// let catalog = Catalog::from_yaml_str(r#"
/// seniorityLevels: [Senior]
/// addOnCategory: Extras
/// services:
///   - category: Cut
///     items:
///       - { id: A, name: Cut A, price: { type: fixed, base: 20 } }
///   - category: Extras
///     items:
///       - { id: C, name: Add-on C, price: { type: fixed, base: 10 } }
/// "#).unwrap();
///
/// let errors = validate_selection(&catalog, &Selection::new());
/// assert_eq!(errors.get("seniorityLevel"), ["Please select a stylist level."]);
/// assert_eq!(errors.get("services"), ["Please select at least one main service."]);
/// ```
pub fn validate_selection(catalog: &Catalog, selection: &Selection) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let level = match selection.seniority_level {
        None => {
            errors.add(SENIORITY_LEVEL_FIELD, "Please select a stylist level.");
            None
        }
        Some(level) if !catalog.offers_level(level) => {
            errors.add(
                SENIORITY_LEVEL_FIELD,
                format!("Stylist level '{}' is not offered.", level),
            );
            None
        }
        Some(level) => Some(level),
    };

    let mut has_main_service = false;
    let mut needs_duration = false;
    let mut duration_too_large = false;

    for (field, item_id) in selection.chosen_services() {
        let category = match catalog.category_by_field(field) {
            Some(category) if !category.is_add_on() => category,
            _ => {
                errors.add(field, format!("Unknown service category '{}'.", field));
                continue;
            }
        };

        let Some((owner, item)) = catalog.locate_item(item_id) else {
            errors.add(field, format!("Invalid service selected: {}", item_id));
            continue;
        };
        if owner.field != category.field {
            errors.add(
                field,
                format!("'{}' is not part of {}.", item.name, category.name),
            );
            continue;
        }
        has_main_service = true;

        needs_duration |= item.price.is_hourly();
        duration_too_large |= matches!(
            evaluate_price(&item.price, level, selection.hourly_duration),
            PriceOutcome::Unavailable(Unavailable::Overflow)
        );
        check_offered(&mut errors, field, &item.name, &item.price, level);
    }

    if !has_main_service {
        errors.add(MAIN_SERVICE_FIELD, "Please select at least one main service.");
    }

    validate_add_ons(catalog, selection, level, has_main_service, &mut errors);

    if needs_duration && !selection.hourly_duration.is_some_and(|hours| hours > Decimal::ZERO) {
        errors.add(
            HOURLY_DURATION_FIELD,
            "Duration (in hours) is required when an hourly service is selected.",
        );
    } else if duration_too_large {
        errors.add(HOURLY_DURATION_FIELD, DURATION_TOO_LARGE);
    }

    errors
}

fn validate_add_ons(
    catalog: &Catalog,
    selection: &Selection,
    level: Option<SeniorityLevel>,
    has_main_service: bool,
    errors: &mut FieldErrors,
) {
    if selection.add_ons.is_empty() {
        return;
    }
    if !has_main_service {
        errors.add(
            ADD_ON_FIELD,
            "Add-ons can only be selected with a main service.",
        );
    }

    let mut seen = HashSet::new();
    for item_id in &selection.add_ons {
        if !seen.insert(item_id.as_str()) {
            errors.add(
                ADD_ON_FIELD,
                format!("Add-on selected more than once: {}", item_id),
            );
            continue;
        }
        let Some((owner, item)) = catalog.locate_item(item_id) else {
            errors.add(ADD_ON_FIELD, format!("Invalid add-on selected: {}", item_id));
            continue;
        };
        if !owner.is_add_on() {
            errors.add(ADD_ON_FIELD, format!("'{}' is not an add-on.", item.name));
            continue;
        }
        check_offered(errors, ADD_ON_FIELD, &item.name, &item.price, level);
    }
}

fn check_offered(
    errors: &mut FieldErrors,
    field: &str,
    item_name: &str,
    price: &PriceRule,
    level: Option<SeniorityLevel>,
) {
    if let Some(level) = level {
        if !is_offered_at(price, level) {
            errors.add(
                field,
                format!("{} is not available for {} stylists.", item_name, level),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Downpayment;
    use crate::test_support::{dec, scenario_catalog};

    fn senior_selection() -> Selection {
        let mut selection = Selection::new();
        selection.set_seniority_level(Some(SeniorityLevel::Senior));
        selection
    }

    #[test]
    fn test_complete_selection_has_no_errors() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "A");
        selection.select_service("colour", "B");
        selection.set_hourly_duration(Some(dec("2")));
        selection.add_add_on("C");
        selection.set_downpayment(Downpayment::try_from(dec("15")).unwrap());

        let errors = validate_selection(&catalog, &selection);
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_missing_level_is_reported() {
        let catalog = scenario_catalog();
        let mut selection = Selection::new();
        selection.select_service("cut", "A");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("seniorityLevel"), ["Please select a stylist level."]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_level_not_offered_by_catalog_is_reported() {
        let catalog = scenario_catalog();
        let mut selection = Selection::new();
        selection.set_seniority_level(Some(SeniorityLevel::Baby));
        selection.select_service("cut", "A");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("seniorityLevel"), ["Stylist level 'Baby' is not offered."]);
    }

    #[test]
    fn test_add_on_only_selection_is_rejected() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.add_add_on("C");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("services"), ["Please select at least one main service."]);
        assert_eq!(
            errors.get("addOns"),
            ["Add-ons can only be selected with a main service."]
        );
    }

    #[test]
    fn test_unknown_item_id_names_the_field() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "Z");
        selection.add_add_on("nope");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("cut"), ["Invalid service selected: Z"]);
        assert_eq!(errors.get("addOns"), ["Invalid add-on selected: nope"]);
    }

    #[test]
    fn test_unresolved_main_service_does_not_count_for_add_ons() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "Z");
        selection.add_add_on("C");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("cut"), ["Invalid service selected: Z"]);
        assert_eq!(errors.get("services"), ["Please select at least one main service."]);
        assert_eq!(
            errors.get("addOns"),
            ["Add-ons can only be selected with a main service."]
        );
    }

    #[test]
    fn test_duration_too_large_to_price_is_rejected() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("colour", "B");
        selection.set_hourly_duration(Some(Decimal::MAX));

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("hourlyDuration"), [DURATION_TOO_LARGE]);
        assert_eq!(errors.len(), 1);

        // The same duration is harmless when no hourly service needs it.
        selection.select_service("colour", "F");
        assert!(validate_selection(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_item_chosen_under_wrong_category_is_rejected() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "F");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("cut"), ["'Foils F' is not part of Cut."]);
    }

    #[test]
    fn test_unknown_category_field_is_rejected() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("nailArt", "A");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("nailArt"), ["Unknown service category 'nailArt'."]);
        assert!(errors.contains("services"));
    }

    #[test]
    fn test_main_service_cannot_be_an_add_on() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "A");
        selection.add_add_on("A");

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("addOns"), ["'Cut A' is not an add-on."]);
    }

    #[test]
    fn test_duplicate_add_on_is_rejected() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "A");
        selection.add_ons = vec!["C".to_string(), "C".to_string()];

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(errors.get("addOns"), ["Add-on selected more than once: C"]);
    }

    #[test]
    fn test_hourly_service_without_duration_is_rejected() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("colour", "B");

        for duration in [None, Some(dec("0")), Some(dec("-2"))] {
            selection.set_hourly_duration(duration);
            let errors = validate_selection(&catalog, &selection);
            assert_eq!(
                errors.get("hourlyDuration"),
                ["Duration (in hours) is required when an hourly service is selected."]
            );
            assert_eq!(errors.len(), 1);
        }

        selection.set_hourly_duration(Some(dec("0.5")));
        assert!(validate_selection(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_duration_is_ignored_without_hourly_service() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "A");
        selection.set_hourly_duration(Some(dec("-1")));

        assert!(validate_selection(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_hourly_add_on_does_not_require_duration() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("cut", "A");
        selection.add_add_on("H");

        assert!(validate_selection(&catalog, &selection).is_empty());
    }

    #[test]
    fn test_service_not_priced_for_level_is_rejected() {
        let catalog = scenario_catalog();
        let mut selection = Selection::new();
        selection.set_seniority_level(Some(SeniorityLevel::Junior));
        selection.select_service("colour", "B");
        selection.add_add_on("H");
        selection.set_hourly_duration(Some(dec("1")));

        let errors = validate_selection(&catalog, &selection);
        assert_eq!(
            errors.get("colour"),
            ["Colour B is not available for Junior stylists."]
        );
        assert_eq!(
            errors.get("addOns"),
            ["Add-on H is not available for Junior stylists."]
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let catalog = scenario_catalog();
        let mut selection = senior_selection();
        selection.select_service("colour", "B");
        selection.add_add_on("C");
        selection.add_add_on("missing");

        let before = selection.clone();
        let first = validate_selection(&catalog, &selection);
        let second = validate_selection(&catalog, &selection);
        assert_eq!(first, second);
        assert_eq!(selection, before);
    }
}
