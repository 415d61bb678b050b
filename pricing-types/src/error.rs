//! Error types for the pricing calculator.

use crate::domain::SelectionField;

/// Failures of the data source behind the loader.
///
/// The loader only distinguishes success from failure; the variants exist for
/// logging.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Failures of a submit action.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Selection incomplete, missing: {}", join_fields(.missing))]
    Incomplete { missing: Vec<SelectionField> },

    #[error("Submission handler failed: {0}")]
    Handler(String),
}

fn join_fields(fields: &[SelectionField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
