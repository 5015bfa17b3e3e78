// Use case: list_attempts.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::DeliveryAttemptRow;

/// Returns a submission's delivery attempt history, oldest first.
pub struct ListAttemptsUseCase;

#[derive(Debug)]
pub enum ListAttemptsError {
    Storage(String),
}

impl ListAttemptsUseCase {
    /// List every recorded attempt for the submission. A submission with no
    /// deliveries (or an unknown one) yields an empty history.
    pub async fn execute(
        ctx: &AppContext,
        submission_id: uuid::Uuid,
    ) -> Result<Vec<DeliveryAttemptRow>, ListAttemptsError> {
        ctx.repos
            .delivery_attempt
            .list_by_submission(submission_id)
            .await
            .map_err(|e| ListAttemptsError::Storage(format!("{e:?}")))
    }
}
