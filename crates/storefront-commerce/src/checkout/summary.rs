//! Order summary: shipping, tax and grand total for a cart subtotal.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 5000;

/// Flat shipping charge below the threshold.
pub const FLAT_SHIPPING_CENTS: i64 = 999;

/// Sales tax on the subtotal, in basis points (8%).
pub const TAX_RATE_BASIS_POINTS: i64 = 800;

/// Price breakdown shown before checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Compute shipping, tax and total for `subtotal`.
    ///
    /// Shipping is not taxed.
    pub fn summarize(subtotal: Money) -> Self {
        let shipping = if subtotal.amount_cents > FREE_SHIPPING_THRESHOLD_CENTS {
            Money::zero(subtotal.currency)
        } else {
            Money::new(FLAT_SHIPPING_CENTS, subtotal.currency)
        };
        let tax = subtotal.basis_points(TAX_RATE_BASIS_POINTS);
        let total = Money::new(
            subtotal
                .amount_cents
                .saturating_add(shipping.amount_cents)
                .saturating_add(tax.amount_cents),
            subtotal.currency,
        );

        Self {
            subtotal,
            shipping,
            tax,
            total,
        }
    }

    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more the customer must spend to ship free.
    ///
    /// `None` once shipping is already free.
    pub fn amount_to_free_shipping(&self) -> Option<Money> {
        if self.has_free_shipping() {
            return None;
        }
        Some(Money::new(
            FREE_SHIPPING_THRESHOLD_CENTS - self.subtotal.amount_cents,
            self.subtotal.currency,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold() {
        let summary = OrderSummary::summarize(Money::usd(4000));
        assert_eq!(summary.shipping, Money::usd(999));
        assert_eq!(summary.tax, Money::usd(320));
        assert_eq!(summary.total, Money::usd(5319));
        assert_eq!(summary.amount_to_free_shipping(), Some(Money::usd(1000)));
    }

    #[test]
    fn test_above_threshold() {
        let summary = OrderSummary::summarize(Money::usd(6000));
        assert_eq!(summary.shipping, Money::usd(0));
        assert_eq!(summary.tax, Money::usd(480));
        assert_eq!(summary.total, Money::usd(6480));
        assert!(summary.has_free_shipping());
        assert_eq!(summary.amount_to_free_shipping(), None);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let summary = OrderSummary::summarize(Money::usd(5000));
        assert_eq!(summary.shipping, Money::usd(999));
        assert_eq!(summary.amount_to_free_shipping(), Some(Money::usd(0)));
    }

    #[test]
    fn test_tax_rounds_to_cent() {
        // 8% of 0.06 is 0.0048, of 0.07 is 0.0056.
        assert_eq!(OrderSummary::summarize(Money::usd(6)).tax, Money::usd(0));
        assert_eq!(OrderSummary::summarize(Money::usd(7)).tax, Money::usd(1));
        assert_eq!(OrderSummary::summarize(Money::usd(25)).tax, Money::usd(2));
    }

    #[test]
    fn test_empty_cart() {
        let summary = OrderSummary::summarize(Money::usd(0));
        assert_eq!(summary.shipping, Money::usd(999));
        assert_eq!(summary.tax, Money::usd(0));
        assert_eq!(summary.total, Money::usd(999));
    }
}
