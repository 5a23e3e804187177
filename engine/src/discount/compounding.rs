// Compounding rule: each percentage applies to the price left by the previous one
use super::DiscountCalculator;
use shared::models::DiscountSet;

pub struct Compounding;

impl DiscountCalculator for Compounding {
    fn name(&self) -> &str {
        "compounding"
    }

    fn calculate(&self, base_price: f64, discounts: &DiscountSet) -> f64 {
        // A single discount of 100% or more makes the item free; two over 100%
        // must not multiply back into a positive price.
        discounts
            .as_array()
            .iter()
            .map(|d| (1.0 - d / 100.0).max(0.0))
            .fold(base_price, |price, factor| price * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compounding_chain() {
        // 100 * 0.9 * 0.95 * 0.98
        let result = Compounding.calculate(100.0, &DiscountSet::new(10.0, 5.0, 2.0));
        assert!((result - 83.79).abs() < 1e-9);
    }

    #[test]
    fn test_compounding_never_reaches_zero_below_full_discounts() {
        let result = Compounding.calculate(100.0, &DiscountSet::new(50.0, 50.0, 50.0));
        assert!((result - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_compounding_single_full_discount() {
        assert_eq!(Compounding.calculate(100.0, &DiscountSet::new(0.0, 100.0, 0.0)), 0.0);
        assert_eq!(Compounding.calculate(100.0, &DiscountSet::new(0.0, 0.0, 150.0)), 0.0);
    }

    #[test]
    fn test_compounding_over_full_discounts_stay_free() {
        assert_eq!(Compounding.calculate(100.0, &DiscountSet::new(150.0, 150.0, 0.0)), 0.0);
        assert_eq!(Compounding.calculate(100.0, &DiscountSet::new(150.0, 150.0, 150.0)), 0.0);
    }

    #[test]
    fn test_compounding_negative_discount_is_markup() {
        let result = Compounding.calculate(100.0, &DiscountSet::new(-10.0, 10.0, 0.0));
        assert!((result - 99.0).abs() < 1e-9);
    }
}
