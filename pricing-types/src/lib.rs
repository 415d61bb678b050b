//! # Pricing Types
//!
//! Domain types and port traits for the tariff pricing calculator.
//! This crate has no IO dependencies: only data structures and trait
//! definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Tariff catalog and form selection
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Loader payload, selector views, quote and submission snapshot
//! - `error/` - Loader and submission error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    FormSelection, PaymentOption, PaymentOptionId, PaymentPeriod, SelectionField, Tariff,
    TariffId,
};
pub use dto::*;
pub use error::{LoadError, SubmitError};
pub use exchange_rates::{Currency, ExchangeRateEntry, Ticker};
pub use ports::{CalculatorDataSource, DiscountRule, SubmissionHandler};
