//! Cart pricing rules.

use crate::error::CoreError;

/// Minimum payable checkout amount accepted by the payment provider (DZD).
pub const MIN_CHECKOUT_AMOUNT: f64 = 50.0;

/// Price actually charged for one book.
///
/// Free books cost zero regardless of their listed price; otherwise the
/// percentage discount is applied.
pub fn effective_price(price: f64, discount_percent: f64, free: bool) -> f64 {
    if free {
        return 0.0;
    }
    if discount_percent > 0.0 {
        price - price * discount_percent / 100.0
    } else {
        price
    }
}

/// Sum of effective prices over `(price, discount, free)` cart items.
pub fn cart_total<I>(items: I) -> f64
where
    I: IntoIterator<Item = (f64, f64, bool)>,
{
    items
        .into_iter()
        .map(|(price, discount, free)| effective_price(price, discount, free))
        .sum()
}

/// Validate that a checkout amount meets the provider minimum.
pub fn validate_checkout_amount(amount: f64) -> Result<(), CoreError> {
    if amount < MIN_CHECKOUT_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Checkout amount must be at least {MIN_CHECKOUT_AMOUNT}, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn discount_and_free_pricing() {
        assert_eq!(effective_price(100.0, 10.0, false), 90.0);
        assert_eq!(effective_price(100.0, 0.0, false), 100.0);
        assert_eq!(effective_price(100.0, 50.0, true), 0.0);
    }

    #[test]
    fn cart_total_sums_effective_prices() {
        let total = cart_total([(100.0, 10.0, false), (0.0, 0.0, true)]);
        assert_eq!(total, 90.0);
    }

    #[test]
    fn below_minimum_rejected() {
        assert_matches!(
            validate_checkout_amount(49.99),
            Err(CoreError::Validation(_))
        );
        assert!(validate_checkout_amount(50.0).is_ok());
        assert!(validate_checkout_amount(90.0).is_ok());
    }
}
