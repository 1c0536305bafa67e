//! Estimate aggregation.
//!
//! This module prices a validated selection line by line and produces the
//! final [`EstimateResult`], including the pricing trace.

use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::config::{
    Catalog, HOURLY_DURATION_FIELD, MAIN_SERVICE_FIELD, ServiceCategory, ServiceItem,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EstimateResult, FieldErrors, LineItem, PricingStep, Selection, SeniorityLevel,
};

use super::formatting::format_currency;
use super::price_evaluation::{
    PriceBasis, PriceOutcome, ResolvedPrice, evaluate_add_on_price, evaluate_price,
};
use super::validation::{DURATION_TOO_LARGE, validate_selection};

/// Computes the estimate for a selection.
///
/// Invalid selections produce an [`EstimateResult`] with `is_valid == false`,
/// the field errors, no lines and a zero total. Valid selections are priced
/// with main services in catalog order followed by add-ons in the order they
/// were chosen; the total is the subtotal less the downpayment, clamped at
/// zero. A subtotal too large for a `Decimal` is reported as a field error,
/// not a panic.
///
/// # Errors
///
/// Returns `UnavailablePrice` if an item that passed validation cannot be
/// priced. This is an internal-consistency failure, never a user mistake.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use salon_estimator::calculation::calculate_estimate;
/// use salon_estimator::config::Catalog;
/// use salon_estimator::models::{Downpayment, Selection, SeniorityLevel};
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
/// let mut selection = Selection::new();
/// selection.set_seniority_level(Some(SeniorityLevel::Senior));
/// selection.select_service("cut", "A");
/// selection.add_add_on("C");
/// selection.set_downpayment(Downpayment::try_from(Decimal::from(50)).unwrap());
///
/// let result = calculate_estimate(&catalog, &selection).unwrap();
/// assert!(result.is_valid);
/// assert_eq!(result.subtotal, Decimal::from(30));
/// assert_eq!(result.total_cost, Decimal::ZERO);
/// ```
pub fn calculate_estimate(catalog: &Catalog, selection: &Selection) -> EngineResult<EstimateResult> {
    let field_errors = validate_selection(catalog, selection);
    let level = match selection.seniority_level {
        Some(level) if field_errors.is_empty() => level,
        _ => {
            debug!(errors = field_errors.len(), "Selection is not yet valid");
            return Ok(EstimateResult::invalid(field_errors));
        }
    };

    let mut steps = Vec::new();
    let mut line_items = Vec::new();
    for category in catalog.main_categories() {
        let Some(item_id) = selection.chosen_service(&category.field) else {
            continue;
        };
        let item = category
            .item(item_id)
            .ok_or_else(|| unavailable(item_id, level, format!("not part of {}", category.name)))?;
        let outcome = evaluate_price(&item.price, Some(level), selection.hourly_duration);
        let price = resolved(item, level, outcome)?;
        steps.push(main_step(steps.len() as u32 + 1, item, level, &price));
        line_items.push(line_item(category, item, &price));
    }

    let add_on_category = catalog.add_on_category();
    let mut add_on_items = Vec::with_capacity(selection.add_ons.len());
    for item_id in &selection.add_ons {
        let item = add_on_category
            .item(item_id)
            .ok_or_else(|| unavailable(item_id, level, "not an add-on".to_string()))?;
        let price = resolved(item, level, evaluate_add_on_price(&item.price, Some(level)))?;
        steps.push(add_on_step(steps.len() as u32 + 1, item, level, &price));
        add_on_items.push(line_item(add_on_category, item, &price));
    }

    let subtotal = line_items
        .iter()
        .chain(add_on_items.iter())
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.unit_cost));
    let Some(subtotal) = subtotal else {
        debug!(level = %level, "Subtotal overflowed");
        return Ok(EstimateResult::invalid(subtotal_overflow_errors(&line_items)));
    };
    // Both sides are non-negative, so this cannot overflow.
    let downpayment = selection.downpayment.amount();
    let total_cost = (subtotal - downpayment).max(Decimal::ZERO);

    debug!(
        level = %level,
        lines = line_items.len(),
        add_ons = add_on_items.len(),
        subtotal = %subtotal,
        downpayment = %downpayment,
        total = %total_cost,
        "Estimate recomputed"
    );

    Ok(EstimateResult {
        is_valid: true,
        field_errors,
        line_items,
        add_on_items,
        subtotal,
        downpayment,
        total_cost,
        steps,
    })
}

fn subtotal_overflow_errors(line_items: &[LineItem]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if line_items.iter().any(|line| line.hours.is_some()) {
        errors.add(HOURLY_DURATION_FIELD, DURATION_TOO_LARGE);
    } else {
        errors.add(MAIN_SERVICE_FIELD, "Estimate total is too large.");
    }
    errors
}

fn unavailable(item_id: &str, level: SeniorityLevel, reason: String) -> EngineError {
    error!(item_id, level = %level, reason = %reason, "Validated item could not be priced");
    EngineError::UnavailablePrice {
        item_id: item_id.to_string(),
        level,
        reason,
    }
}

fn resolved(
    item: &ServiceItem,
    level: SeniorityLevel,
    outcome: PriceOutcome,
) -> EngineResult<ResolvedPrice> {
    match outcome {
        PriceOutcome::Available(price) => Ok(price),
        PriceOutcome::Unavailable(reason) => Err(unavailable(&item.id, level, reason.to_string())),
    }
}

fn line_item(category: &ServiceCategory, item: &ServiceItem, price: &ResolvedPrice) -> LineItem {
    let (hours, rate) = match price.basis {
        PriceBasis::Hourly { rate, hours } => (hours, Some(rate)),
        _ => (None, None),
    };
    LineItem {
        category: category.name.clone(),
        field: category.field.clone(),
        item_id: item.id.clone(),
        item_name: item.name.clone(),
        unit_cost: price.amount,
        hours,
        rate,
    }
}

fn main_step(
    step_number: u32,
    item: &ServiceItem,
    level: SeniorityLevel,
    price: &ResolvedPrice,
) -> PricingStep {
    let amount = format_currency(price.amount);
    let (rule_id, input, output, reasoning) = match price.basis {
        PriceBasis::Fixed => (
            "fixed_price",
            serde_json::json!({ "level": level }),
            serde_json::json!({ "amount": price.amount.to_string() }),
            format!("'{}' has a fixed price of {}", item.name, amount),
        ),
        PriceBasis::Hourly { rate, hours } => {
            let hours = hours.unwrap_or(Decimal::ONE);
            (
                "hourly_rate",
                serde_json::json!({
                    "level": level,
                    "rate": rate.to_string(),
                    "hours": hours.to_string()
                }),
                serde_json::json!({ "amount": price.amount.to_string() }),
                format!(
                    "{} rate {}/hr x {} hours = {}",
                    level,
                    format_currency(rate),
                    hours.normalize(),
                    amount
                ),
            )
        }
        PriceBasis::LevelSpecific | PriceBasis::Fallback => {
            let source = if price.basis == PriceBasis::LevelSpecific {
                "level"
            } else {
                "fallback"
            };
            (
                "from_level_price",
                serde_json::json!({ "level": level }),
                serde_json::json!({
                    "amount": price.amount.to_string(),
                    "source": source
                }),
                format!(
                    "'{}' starts from {} ({} price for {})",
                    item.name, amount, source, level
                ),
            )
        }
    };

    PricingStep {
        step_number,
        rule_id: rule_id.to_string(),
        item_id: item.id.clone(),
        input,
        output,
        reasoning,
    }
}

fn add_on_step(
    step_number: u32,
    item: &ServiceItem,
    level: SeniorityLevel,
    price: &ResolvedPrice,
) -> PricingStep {
    let reasoning = match price.basis {
        PriceBasis::Hourly { rate, .. } => format!(
            "Add-on '{}' charged the {} hourly rate once: {}",
            item.name,
            level,
            format_currency(rate)
        ),
        _ => format!("Add-on '{}' costs {}", item.name, format_currency(price.amount)),
    };

    PricingStep {
        step_number,
        rule_id: "add_on_price".to_string(),
        item_id: item.id.clone(),
        input: serde_json::json!({ "level": level, "rule": item.price.kind() }),
        output: serde_json::json!({ "amount": price.amount.to_string() }),
        reasoning,
    }
}
