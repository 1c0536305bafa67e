//! Stylist seniority levels.
//!
//! A seniority level selects the price tier used for hourly rates and
//! level-specific "from" prices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The experience tier of the stylist performing the service.
///
/// The set is closed; a catalog offers an ordered subset of it.
///
/// # Example
///
/// ```
/// use salon_estimator::models::SeniorityLevel;
///
/// let level: SeniorityLevel = "senior".parse().unwrap();
/// assert_eq!(level, SeniorityLevel::Senior);
/// assert_eq!(level.to_string(), "Senior");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeniorityLevel {
    /// Trainee stylist.
    Baby,
    /// Junior stylist.
    Junior,
    /// Intermediate stylist.
    Intermediate,
    /// Senior stylist.
    Senior,
}

impl SeniorityLevel {
    /// Every level, most junior first.
    pub const ALL: [SeniorityLevel; 4] = [
        SeniorityLevel::Baby,
        SeniorityLevel::Junior,
        SeniorityLevel::Intermediate,
        SeniorityLevel::Senior,
    ];

    /// Returns the canonical name used in catalogs and selections.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Baby => "Baby",
            SeniorityLevel::Junior => "Junior",
            SeniorityLevel::Intermediate => "Intermediate",
            SeniorityLevel::Senior => "Senior",
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeniorityLevel {
    type Err = EngineError;

    /// Parses a level name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownSeniorityLevel {
                value: s.to_string(),
            })
    }
}
