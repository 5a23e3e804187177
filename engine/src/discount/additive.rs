// Additive rule: the three percentages are summed before being applied
use super::DiscountCalculator;
use shared::models::DiscountSet;

pub struct Additive;

impl DiscountCalculator for Additive {
    fn name(&self) -> &str {
        "additive"
    }

    fn calculate(&self, base_price: f64, discounts: &DiscountSet) -> f64 {
        // A total above 100% gives a free item, not a negative price
        let factor = (1.0 - discounts.total() / 100.0).max(0.0);
        base_price * factor
    }
}
