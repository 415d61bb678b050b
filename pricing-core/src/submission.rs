//! Logging submission handler.

use std::sync::Mutex;

use pricing_types::{SubmissionHandler, SubmissionSnapshot, SubmitError};

/// Stand-in for a checkout integration.
///
/// Logs every snapshot and keeps it in memory.
#[derive(Debug, Default)]
pub struct LoggingSubmissionHandler {
    received: Mutex<Vec<SubmissionSnapshot>>,
}

impl LoggingSubmissionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far, oldest first.
    pub fn submissions(&self) -> Vec<SubmissionSnapshot> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl SubmissionHandler for LoggingSubmissionHandler {
    #[tracing::instrument(skip_all, fields(submission_id = %snapshot.id))]
    async fn submit(&self, snapshot: SubmissionSnapshot) -> Result<(), SubmitError> {
        tracing::info!(
            tariff_id = ?snapshot.selection.tariff_id,
            currency = ?snapshot.selection.currency,
            payment_option_id = ?snapshot.selection.payment_option_id,
            total = %snapshot.quote.display,
            "Submission received"
        );
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(snapshot);
        Ok(())
    }
}
