//! Submission port.

use crate::dto::SubmissionSnapshot;
use crate::error::SubmitError;

/// Receives a complete form once the user submits.
///
/// A checkout integration would implement this; the snapshot is owned and
/// detached from the calculator's live state.
#[async_trait::async_trait]
pub trait SubmissionHandler: Send + Sync {
    async fn submit(&self, snapshot: SubmissionSnapshot) -> Result<(), SubmitError>;
}
