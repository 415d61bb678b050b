//! Domain models for the pricing calculator.

pub mod selection;
pub mod tariff;

pub use selection::{FormSelection, SelectionField};
pub use tariff::{PaymentOption, PaymentOptionId, PaymentPeriod, Tariff, TariffId};
