//! Presentation helpers.
//!
//! Amounts are carried at full precision through pricing and only rounded
//! to cents here, when turned into display strings.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{EstimateResult, PriceRule, SeniorityLevel};

use super::price_evaluation::{PriceOutcome, evaluate_add_on_price, evaluate_price};

/// Rounds an amount to two decimal places, half away from zero.
///
/// The result always carries a scale of 2, so `20` becomes `20.00`.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats an amount as dollars and cents.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use salon_estimator::calculation::format_currency;
///
/// assert_eq!(format_currency(Decimal::new(12345, 1)), "$1234.50");
/// assert_eq!(format_currency(Decimal::new(-15, 0)), "-$15.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to_cents(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}${}", sign, rounded.abs())
}

/// Returns the badge text shown next to a service option.
///
/// Without a level every rule reads "Select level". Hourly rules show the
/// line cost once a positive duration is known, otherwise the rate alone.
/// A duration too large to price also shows the rate alone.
pub fn price_label(
    rule: &PriceRule,
    level: Option<SeniorityLevel>,
    duration: Option<Decimal>,
) -> String {
    let Some(level) = level else {
        return "Select level".to_string();
    };

    match rule {
        PriceRule::Fixed { amount } => format_currency(*amount),
        PriceRule::Hourly { .. } => match evaluate_add_on_price(rule, Some(level)) {
            PriceOutcome::Available(hourly) => {
                match evaluate_price(rule, Some(level), duration).amount() {
                    Some(total) => format!(
                        "{} ({}/hr)",
                        format_currency(total),
                        format_currency(hourly.amount)
                    ),
                    None => format!("{}/hr", format_currency(hourly.amount)),
                }
            }
            PriceOutcome::Unavailable(_) => "N/A for level".to_string(),
        },
        PriceRule::FromLevel { .. } => match evaluate_price(rule, Some(level), None).amount() {
            Some(amount) => format!("From {}", format_currency(amount)),
            None => "N/A".to_string(),
        },
    }
}

/// Renders an estimate as human-readable lines.
pub fn estimate_summary(result: &EstimateResult) -> Vec<String> {
    if !result.is_valid {
        let mut lines = vec!["Estimate is incomplete:".to_string()];
        for (field, messages) in result.field_errors.iter() {
            for message in messages {
                lines.push(format!("  {}: {}", field, message));
            }
        }
        return lines;
    }

    let mut lines = Vec::with_capacity(result.line_items.len() + result.add_on_items.len() + 3);
    for line in &result.line_items {
        let detail = match (line.rate, line.hours) {
            (Some(rate), Some(hours)) => {
                format!(" ({} hrs @ {}/hr)", hours.normalize(), format_currency(rate))
            }
            _ => String::new(),
        };
        lines.push(format!(
            "{}: {}{} {}",
            line.category,
            line.item_name,
            detail,
            format_currency(line.unit_cost)
        ));
    }
    for line in &result.add_on_items {
        lines.push(format!(
            "Add-on: {} {}",
            line.item_name,
            format_currency(line.unit_cost)
        ));
    }
    lines.push(format!("Subtotal: {}", format_currency(result.subtotal)));
    if !result.downpayment.is_zero() {
        lines.push(format!("Downpayment: -{}", format_currency(result.downpayment)));
    }
    lines.push(format!("Total: {}", format_currency(result.total_cost)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_estimate;
    use crate::models::{Downpayment, Selection};
    use crate::test_support::{dec, scenario_catalog};
    use std::collections::BTreeMap;

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(round_to_cents(dec("1.005")).to_string(), "1.01");
        assert_eq!(round_to_cents(dec("-1.005")).to_string(), "-1.01");
        assert_eq!(round_to_cents(dec("20")).to_string(), "20.00");
        assert_eq!(round_to_cents(dec("129.999999")).to_string(), "130.00");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("0")), "$0.00");
        assert_eq!(format_currency(dec("215")), "$215.00");
        assert_eq!(format_currency(dec("1234.5")), "$1234.50");
        assert_eq!(format_currency(dec("-15")), "-$15.00");
        assert_eq!(format_currency(dec("-0.001")), "$0.00");
    }

    #[test]
    fn test_labels_without_level() {
        let rule = PriceRule::Fixed { amount: dec("20") };
        assert_eq!(price_label(&rule, None, None), "Select level");
    }

    #[test]
    fn test_fixed_label() {
        let rule = PriceRule::Fixed { amount: dec("20") };
        assert_eq!(price_label(&rule, Some(SeniorityLevel::Junior), None), "$20.00");
    }

    #[test]
    fn test_hourly_labels() {
        let rule = PriceRule::Hourly {
            rates: BTreeMap::from([(SeniorityLevel::Senior, dec("165"))]),
        };
        let senior = Some(SeniorityLevel::Senior);
        assert_eq!(price_label(&rule, senior, Some(dec("2"))), "$330.00 ($165.00/hr)");
        assert_eq!(price_label(&rule, senior, None), "$165.00/hr");
        assert_eq!(price_label(&rule, senior, Some(dec("0"))), "$165.00/hr");
        assert_eq!(price_label(&rule, senior, Some(Decimal::MAX)), "$165.00/hr");
        assert_eq!(
            price_label(&rule, Some(SeniorityLevel::Junior), Some(dec("2"))),
            "N/A for level"
        );
    }

    #[test]
    fn test_from_level_labels() {
        let rule = PriceRule::FromLevel {
            levels: BTreeMap::from([
                (SeniorityLevel::Senior, Some(dec("400"))),
                (SeniorityLevel::Intermediate, None),
            ]),
            fallback: Some(dec("300")),
        };
        assert_eq!(price_label(&rule, Some(SeniorityLevel::Senior), None), "From $400.00");
        assert_eq!(
            price_label(&rule, Some(SeniorityLevel::Intermediate), None),
            "From $300.00"
        );

        let gap = PriceRule::FromLevel {
            levels: BTreeMap::from([(SeniorityLevel::Junior, None)]),
            fallback: None,
        };
        assert_eq!(price_label(&gap, Some(SeniorityLevel::Junior), None), "N/A");
    }

    #[test]
    fn test_summary_of_valid_estimate() {
        let catalog = scenario_catalog();
        let mut selection = Selection::new();
        selection.set_seniority_level(Some(SeniorityLevel::Senior));
        selection.select_service("cut", "A");
        selection.select_service("colour", "B");
        selection.set_hourly_duration(Some(dec("2")));
        selection.add_add_on("C");
        selection.set_downpayment(Downpayment::try_from(dec("15")).unwrap());

        let result = calculate_estimate(&catalog, &selection).unwrap();
        assert_eq!(
            estimate_summary(&result),
            vec![
                "Cut: Cut A $20.00",
                "Colour: Colour B (2 hrs @ $100.00/hr) $200.00",
                "Add-on: Add-on C $10.00",
                "Subtotal: $230.00",
                "Downpayment: -$15.00",
                "Total: $215.00",
            ]
        );
    }

    #[test]
    fn test_summary_of_invalid_estimate_lists_errors() {
        let catalog = scenario_catalog();
        let result = calculate_estimate(&catalog, &Selection::new()).unwrap();
        let summary = estimate_summary(&result);
        assert_eq!(summary[0], "Estimate is incomplete:");
        assert!(summary.contains(&"  seniorityLevel: Please select a stylist level.".to_string()));
        assert!(
            summary.contains(&"  services: Please select at least one main service.".to_string())
        );
    }
}
