// Discount calculation: combination rules and the table reconciliation built on them
pub mod additive;
pub mod compounding;
pub mod reconcile;

pub use additive::Additive;
pub use compounding::Compounding;
pub use reconcile::{effective_discounts, has_override, recompute_table};

use serde::{Deserialize, Serialize};
use shared::models::{CellValue, DiscountSet};

// Common trait for all combination rules
pub trait DiscountCalculator: Send + Sync {
    fn name(&self) -> &str;
    /// Unrounded final price.
    fn calculate(&self, base_price: f64, discounts: &DiscountSet) -> f64;
}

/// How the three discounts of a set combine. One rule is chosen per session and used everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountRule {
    /// `base * (1 - (d1+d2+d3)/100)`, never below zero.
    #[default]
    Additive,
    /// `base * (1-d1/100) * (1-d2/100) * (1-d3/100)`, each factor never below zero.
    Compounding,
}

impl DiscountRule {
    pub fn calculator(&self) -> &'static dyn DiscountCalculator {
        match self {
            DiscountRule::Additive => &Additive,
            DiscountRule::Compounding => &Compounding,
        }
    }
}

// Binary noise below a millionth of a cent is dropped first, so decimal halves
// like 1.005 (stored as 1.00499999...) still round up.
const CENT_NOISE: f64 = 1e6;

/// Rounds to cents, half away from zero (0.125 -> 0.13, 1.005 -> 1.01).
pub fn round_price(value: f64) -> f64 {
    let cents = (value * 100.0 * CENT_NOISE).round() / CENT_NOISE;
    cents.round() / 100.0
}

/// Final price of one cell, or `None` when the base price is empty or not numeric.
///
/// `None` is the sentinel for unparseable prices: it never panics and is
/// written back as an empty cell.
pub fn apply_discount(base_price: &CellValue, discounts: &DiscountSet, rule: DiscountRule) -> Option<f64> {
    let base = base_price.as_number()?;
    Some(round_price(rule.calculator().calculate(base, discounts)))
}
