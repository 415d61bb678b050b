//! Port traits (interfaces for adapters).
//!
//! The calculator depends on these traits, not on concrete implementations.

mod data_source;
mod discount;
mod submission;

pub use data_source::CalculatorDataSource;
pub use discount::DiscountRule;
pub use submission::SubmissionHandler;
