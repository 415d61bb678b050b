//! # Pricing Core
//!
//! The tariff pricing calculator: derivation graph, memo cells and the
//! calculator component, plus the in-process adapters.
//!
//! ## Architecture
//!
//! - `derive` - Pure derivation functions (selected tariff, rate, total, ...)
//! - `memo` - Recompute-on-read cells caching derived values
//! - `calculator` - State store, setters, reset rule, loader and submit
//! - `discount` - Discount rules
//! - `sources` / `submission` - In-memory data source, logging submit handler
//!
//! The calculator is generic over `D: DiscountRule`; data sources and
//! submission handlers are passed per call.

pub mod calculator;
pub mod derive;
pub mod discount;
pub mod memo;
pub mod sources;
pub mod submission;

#[cfg(test)]
mod calculator_tests;

pub use calculator::{Calculator, DerivedStats, LoadOutcome};
pub use discount::{NoDiscount, PeriodDiscount};
pub use sources::StaticDataSource;
pub use submission::LoggingSubmissionHandler;
