//! Discount rule port.

use crate::domain::{PaymentOption, Tariff};

/// Discount granted for choosing `option`, in the tariff's base currency.
///
/// Implementations must be total: return `0.0` rather than fail.
pub trait DiscountRule: Send + Sync {
    fn discount(&self, tariff: &Tariff, option: &PaymentOption) -> f64;
}
