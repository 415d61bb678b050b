//! Discount rules.

use pricing_types::{DiscountRule, PaymentOption, Tariff};

/// Grants nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscount;

impl DiscountRule for NoDiscount {
    fn discount(&self, _tariff: &Tariff, _option: &PaymentOption) -> f64 {
        0.0
    }
}

/// Savings from paying for a longer period up front.
///
/// The reference is the tariff's shortest-period option, repeated to cover the
/// same number of months as `option`. The discount is what `option` saves
/// against that, never below zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodDiscount;

impl DiscountRule for PeriodDiscount {
    fn discount(&self, tariff: &Tariff, option: &PaymentOption) -> f64 {
        let Some(reference) = tariff
            .payment_options
            .iter()
            .min_by_key(|candidate| candidate.payment_period.months())
        else {
            return 0.0;
        };

        let per_month = reference.base_price / f64::from(reference.payment_period.months());
        let undiscounted = per_month * f64::from(option.payment_period.months());
        (undiscounted - option.base_price).max(0.0)
    }
}
