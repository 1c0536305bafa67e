//! Price rules attached to catalog items.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SeniorityLevel;

/// Describes how a single catalog item is priced.
///
/// A level that is missing from a rate table (or mapped to `None`) means the
/// combination is not orderable at that level; it never means "free".
///
/// # Example
///
/// ```
/// use salon_estimator::models::{PriceRule, SeniorityLevel};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let rule = PriceRule::Hourly {
///     rates: BTreeMap::from([(SeniorityLevel::Senior, Decimal::from(165))]),
/// };
/// assert!(rule.is_hourly());
/// assert_eq!(rule.kind(), "hourly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PriceRule {
    /// A flat cost independent of level and duration.
    Fixed {
        /// The flat amount.
        amount: Decimal,
    },
    /// A per-hour rate that depends on the stylist level.
    Hourly {
        /// Hourly rate per level.
        rates: BTreeMap<SeniorityLevel, Decimal>,
    },
    /// A "starting at" price, optionally specific to the stylist level.
    #[serde(rename = "from")]
    FromLevel {
        /// Level-specific starting prices; `None` marks an explicit gap.
        levels: BTreeMap<SeniorityLevel, Option<Decimal>>,
        /// Catalog-wide starting price used when the level has no entry.
        fallback: Option<Decimal>,
    },
}

impl PriceRule {
    /// Returns true if the rule charges by the hour.
    pub fn is_hourly(&self) -> bool {
        matches!(self, PriceRule::Hourly { .. })
    }

    /// Returns the intake name of the rule type.
    pub fn kind(&self) -> &'static str {
        match self {
            PriceRule::Fixed { .. } => "fixed",
            PriceRule::Hourly { .. } => "hourly",
            PriceRule::FromLevel { .. } => "from",
        }
    }

    /// Iterates over every amount the rule can ever charge (or charge per hour).
    pub fn amounts(&self) -> Box<dyn Iterator<Item = Decimal> + '_> {
        match self {
            PriceRule::Fixed { amount } => Box::new(std::iter::once(*amount)),
            PriceRule::Hourly { rates } => Box::new(rates.values().copied()),
            PriceRule::FromLevel { levels, fallback } => {
                Box::new(levels.values().flatten().copied().chain(*fallback))
            }
        }
    }
}
