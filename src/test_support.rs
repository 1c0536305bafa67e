//! Shared fixtures for unit tests.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::Catalog;

/// A small catalog covering every price rule shape.
///
/// - `Cut` (`cut`): `A` fixed 20
/// - `Colour` (`colour`): `B` hourly, Senior only at 100; `F` from 400 for
///   Senior, no Intermediate price, 300 otherwise
/// - `Extras` (`addOns`): `C` fixed 10; `H` hourly, Senior only at 40
pub(crate) const SCENARIO_CATALOG_YAML: &str = r#"
version: scenario
seniorityLevels: [Junior, Intermediate, Senior]
addOnCategory: Extras
services:
  - category: Cut
    description: Cuts
    items:
      - { id: A, name: Cut A, price: { type: fixed, base: 20 } }
  - category: Colour
    description: Colour work
    items:
      - { id: B, name: Colour B, price: { type: hourly, rates: { Senior: 100 } } }
      - id: F
        name: Foils F
        price: { type: from, levels: { Senior: 400, Intermediate: null }, base: 300 }
        notes: Starting price
  - category: Extras
    description: Add-ons
    items:
      - { id: C, name: Add-on C, price: { type: fixed, base: 10 } }
      - { id: H, name: Add-on H, price: { type: hourly, rates: { Senior: 40 } } }
"#;

pub(crate) fn scenario_catalog() -> Catalog {
    Catalog::from_yaml_str(SCENARIO_CATALOG_YAML).unwrap()
}

pub(crate) fn shared_scenario_catalog() -> Arc<Catalog> {
    Arc::new(scenario_catalog())
}

/// Helper to create a Decimal from a string.
pub(crate) fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
