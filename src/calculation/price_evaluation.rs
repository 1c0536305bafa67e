//! Price rule evaluation.
//!
//! This module turns a [`PriceRule`] plus the selection's level and duration
//! into an amount, or into an explicit [`Unavailable`] outcome. A missing
//! price is never reported as zero.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{PriceRule, SeniorityLevel};

/// Why a price could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The rule depends on the level and none was chosen.
    LevelRequired,
    /// An hourly rule has no rate for the level.
    NoRateForLevel(SeniorityLevel),
    /// An hourly rule needs a positive duration.
    DurationRequired,
    /// A from-level rule has neither a level price nor a fallback.
    NoPriceForLevel(SeniorityLevel),
    /// Rate times duration does not fit in a `Decimal`.
    Overflow,
}

impl Unavailable {
    /// Returns true if the gap is in the catalog itself for this level, as
    /// opposed to missing input.
    pub fn is_level_gap(&self) -> bool {
        matches!(
            self,
            Unavailable::NoRateForLevel(_) | Unavailable::NoPriceForLevel(_)
        )
    }
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::LevelRequired => write!(f, "a seniority level is required"),
            Unavailable::NoRateForLevel(level) => write!(f, "no hourly rate for {}", level),
            Unavailable::DurationRequired => write!(f, "a positive duration is required"),
            Unavailable::NoPriceForLevel(level) => {
                write!(f, "no level price or fallback for {}", level)
            }
            Unavailable::Overflow => write!(f, "the amount is too large"),
        }
    }
}

/// How an available price was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBasis {
    /// A flat amount.
    Fixed,
    /// A per-hour rate; `hours` is `None` when the rate was charged flat.
    Hourly {
        /// The rate for the level.
        rate: Decimal,
        /// Hours multiplied in.
        hours: Option<Decimal>,
    },
    /// A from-level rule's level-specific amount.
    LevelSpecific,
    /// A from-level rule's catalog-wide fallback.
    Fallback,
}

/// A resolved price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPrice {
    /// The cost.
    pub amount: Decimal,
    /// How it was resolved.
    pub basis: PriceBasis,
}

/// The outcome of evaluating a price rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOutcome {
    /// The price resolved.
    Available(ResolvedPrice),
    /// The combination cannot be ordered.
    Unavailable(Unavailable),
}

impl PriceOutcome {
    /// Returns the amount, or `None` if unavailable.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            PriceOutcome::Available(price) => Some(price.amount),
            PriceOutcome::Unavailable(_) => None,
        }
    }
}

fn available(amount: Decimal, basis: PriceBasis) -> PriceOutcome {
    PriceOutcome::Available(ResolvedPrice { amount, basis })
}

/// Evaluates a main-service price rule.
///
/// - `Fixed` always resolves, even without a level.
/// - `Hourly` needs a level with a rate and a duration above zero, and a
///   product that fits in a `Decimal`.
/// - `FromLevel` needs a level, then tries the level-specific amount, then
///   the fallback. An explicit `None` for the level falls through to the
///   fallback; an explicit zero is a real price.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use rust_decimal::Decimal;
/// use salon_estimator::calculation::evaluate_price;
/// use salon_estimator::models::{PriceRule, SeniorityLevel};
///
/// let rule = PriceRule::FromLevel {
///     levels: BTreeMap::from([
///         (SeniorityLevel::Senior, Some(Decimal::from(400))),
///         (SeniorityLevel::Intermediate, None),
///     ]),
///     fallback: Some(Decimal::from(300)),
/// };
///
/// let outcome = evaluate_price(&rule, Some(SeniorityLevel::Intermediate), None);
/// assert_eq!(outcome.amount(), Some(Decimal::from(300)));
/// ```
pub fn evaluate_price(
    rule: &PriceRule,
    level: Option<SeniorityLevel>,
    duration: Option<Decimal>,
) -> PriceOutcome {
    match rule {
        PriceRule::Fixed { amount } => available(*amount, PriceBasis::Fixed),
        PriceRule::Hourly { rates } => {
            let Some(level) = level else {
                return PriceOutcome::Unavailable(Unavailable::LevelRequired);
            };
            let Some(&rate) = rates.get(&level) else {
                return PriceOutcome::Unavailable(Unavailable::NoRateForLevel(level));
            };
            match duration {
                Some(hours) if hours > Decimal::ZERO => match rate.checked_mul(hours) {
                    Some(amount) => available(
                        amount,
                        PriceBasis::Hourly {
                            rate,
                            hours: Some(hours),
                        },
                    ),
                    None => PriceOutcome::Unavailable(Unavailable::Overflow),
                },
                _ => PriceOutcome::Unavailable(Unavailable::DurationRequired),
            }
        }
        PriceRule::FromLevel { levels, fallback } => {
            let Some(level) = level else {
                return PriceOutcome::Unavailable(Unavailable::LevelRequired);
            };
            if let Some(Some(amount)) = levels.get(&level) {
                return available(*amount, PriceBasis::LevelSpecific);
            }
            match fallback {
                Some(amount) => available(*amount, PriceBasis::Fallback),
                None => PriceOutcome::Unavailable(Unavailable::NoPriceForLevel(level)),
            }
        }
    }
}

/// Evaluates an add-on price rule.
///
/// Add-ons never consume the appointment duration: an hourly add-on is
/// charged its level rate once, as a flat amount.
pub fn evaluate_add_on_price(rule: &PriceRule, level: Option<SeniorityLevel>) -> PriceOutcome {
    match rule {
        PriceRule::Hourly { rates } => {
            let Some(level) = level else {
                return PriceOutcome::Unavailable(Unavailable::LevelRequired);
            };
            match rates.get(&level) {
                Some(&rate) => available(rate, PriceBasis::Hourly { rate, hours: None }),
                None => PriceOutcome::Unavailable(Unavailable::NoRateForLevel(level)),
            }
        }
        _ => evaluate_price(rule, level, None),
    }
}

/// Returns true if the rule can be priced at the level given some duration.
///
/// Used by validation to tell catalog gaps from missing input.
pub fn is_offered_at(rule: &PriceRule, level: SeniorityLevel) -> bool {
    match evaluate_add_on_price(rule, Some(level)) {
        PriceOutcome::Available(_) => true,
        PriceOutcome::Unavailable(reason) => !reason.is_level_gap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dec;
    use std::collections::BTreeMap;

    fn hourly_senior_only() -> PriceRule {
        PriceRule::Hourly {
            rates: BTreeMap::from([(SeniorityLevel::Senior, dec("100"))]),
        }
    }

    fn from_senior_400_intermediate_gap() -> PriceRule {
        PriceRule::FromLevel {
            levels: BTreeMap::from([
                (SeniorityLevel::Senior, Some(dec("400"))),
                (SeniorityLevel::Intermediate, None),
            ]),
            fallback: Some(dec("300")),
        }
    }

    #[test]
    fn test_fixed_price_ignores_level_and_duration() {
        let rule = PriceRule::Fixed { amount: dec("20") };
        assert_eq!(evaluate_price(&rule, None, None).amount(), Some(dec("20")));
        assert_eq!(
            evaluate_price(&rule, Some(SeniorityLevel::Junior), Some(dec("3"))).amount(),
            Some(dec("20"))
        );
    }

    #[test]
    fn test_hourly_price_is_rate_times_duration() {
        let outcome = evaluate_price(
            &hourly_senior_only(),
            Some(SeniorityLevel::Senior),
            Some(dec("2.5")),
        );
        assert_eq!(
            outcome,
            PriceOutcome::Available(ResolvedPrice {
                amount: dec("250"),
                basis: PriceBasis::Hourly {
                    rate: dec("100"),
                    hours: Some(dec("2.5")),
                },
            })
        );
    }

    #[test]
    fn test_hourly_without_level_is_unavailable() {
        assert_eq!(
            evaluate_price(&hourly_senior_only(), None, Some(dec("2"))),
            PriceOutcome::Unavailable(Unavailable::LevelRequired)
        );
    }

    #[test]
    fn test_hourly_without_rate_for_level_is_unavailable() {
        assert_eq!(
            evaluate_price(&hourly_senior_only(), Some(SeniorityLevel::Junior), Some(dec("2"))),
            PriceOutcome::Unavailable(Unavailable::NoRateForLevel(SeniorityLevel::Junior))
        );
    }

    #[test]
    fn test_hourly_requires_positive_duration() {
        let rule = hourly_senior_only();
        let level = Some(SeniorityLevel::Senior);
        for duration in [None, Some(dec("0")), Some(dec("-1"))] {
            assert_eq!(
                evaluate_price(&rule, level, duration),
                PriceOutcome::Unavailable(Unavailable::DurationRequired),
                "duration {:?}",
                duration
            );
        }
    }

    #[test]
    fn test_hourly_overflow_is_unavailable_not_a_panic() {
        let outcome = evaluate_price(
            &hourly_senior_only(),
            Some(SeniorityLevel::Senior),
            Some(Decimal::MAX),
        );
        assert_eq!(outcome, PriceOutcome::Unavailable(Unavailable::Overflow));
        assert!(!Unavailable::Overflow.is_level_gap());
    }

    #[test]
    fn test_from_level_prefers_level_specific_amount() {
        let outcome = evaluate_price(
            &from_senior_400_intermediate_gap(),
            Some(SeniorityLevel::Senior),
            None,
        );
        assert_eq!(
            outcome,
            PriceOutcome::Available(ResolvedPrice {
                amount: dec("400"),
                basis: PriceBasis::LevelSpecific,
            })
        );
    }

    #[test]
    fn test_from_level_null_entry_falls_through_to_fallback() {
        let outcome = evaluate_price(
            &from_senior_400_intermediate_gap(),
            Some(SeniorityLevel::Intermediate),
            None,
        );
        assert_eq!(
            outcome,
            PriceOutcome::Available(ResolvedPrice {
                amount: dec("300"),
                basis: PriceBasis::Fallback,
            })
        );
    }

    #[test]
    fn test_from_level_missing_entry_falls_through_to_fallback() {
        let outcome = evaluate_price(
            &from_senior_400_intermediate_gap(),
            Some(SeniorityLevel::Junior),
            None,
        );
        assert_eq!(outcome.amount(), Some(dec("300")));
    }

    #[test]
    fn test_from_level_without_fallback_is_unavailable() {
        let rule = PriceRule::FromLevel {
            levels: BTreeMap::from([
                (SeniorityLevel::Senior, Some(dec("100"))),
                (SeniorityLevel::Junior, None),
            ]),
            fallback: None,
        };
        assert_eq!(
            evaluate_price(&rule, Some(SeniorityLevel::Junior), None),
            PriceOutcome::Unavailable(Unavailable::NoPriceForLevel(SeniorityLevel::Junior))
        );
    }

    #[test]
    fn test_from_level_zero_is_a_price_not_a_gap() {
        let rule = PriceRule::FromLevel {
            levels: BTreeMap::from([(SeniorityLevel::Junior, Some(Decimal::ZERO))]),
            fallback: Some(dec("50")),
        };
        assert_eq!(
            evaluate_price(&rule, Some(SeniorityLevel::Junior), None).amount(),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_from_level_requires_level() {
        assert_eq!(
            evaluate_price(&from_senior_400_intermediate_gap(), None, None),
            PriceOutcome::Unavailable(Unavailable::LevelRequired)
        );
    }

    #[test]
    fn test_hourly_add_on_is_charged_flat_rate() {
        // Add-ons ignore the appointment duration, even for hourly rules.
        let outcome = evaluate_add_on_price(&hourly_senior_only(), Some(SeniorityLevel::Senior));
        assert_eq!(
            outcome,
            PriceOutcome::Available(ResolvedPrice {
                amount: dec("100"),
                basis: PriceBasis::Hourly {
                    rate: dec("100"),
                    hours: None,
                },
            })
        );
    }

    #[test]
    fn test_is_offered_at_distinguishes_gaps_from_missing_duration() {
        let hourly = hourly_senior_only();
        assert!(is_offered_at(&hourly, SeniorityLevel::Senior));
        assert!(!is_offered_at(&hourly, SeniorityLevel::Junior));

        let from = PriceRule::FromLevel {
            levels: BTreeMap::from([(SeniorityLevel::Senior, Some(dec("100")))]),
            fallback: None,
        };
        assert!(!is_offered_at(&from, SeniorityLevel::Intermediate));
        assert!(is_offered_at(&PriceRule::Fixed { amount: dec("1") }, SeniorityLevel::Baby));
    }
}
