use crate::domain::entities::submission::{Submission, SubmissionData, SubmissionDataError};
use crate::domain::value_objects::ids::{FormId, SubmissionId};
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    pub id: uuid::Uuid,
    pub form_id: uuid::Uuid,
    pub data: serde_json::Value,
    pub submitted_at: OffsetDateTime,
}

impl SubmissionRow {
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            id: submission.id.0,
            form_id: submission.form_id.0,
            data: submission.data.to_value(),
            submitted_at: submission.submitted_at.as_inner(),
        }
    }

    /// Map a stored row back to the domain entity.
    ///
    /// Fails when the stored document does not match the shapes the form
    /// runtime writes; callers surface that as invalid input rather than
    /// attempting delivery of a payload we cannot vouch for.
    pub fn try_into_submission(self) -> Result<Submission, SubmissionDataError> {
        let data = SubmissionData::from_value(&self.data)?;
        Ok(Submission {
            id: SubmissionId(self.id),
            form_id: FormId(self.form_id),
            submitted_at: Timestamp::from(self.submitted_at),
            data,
        })
    }
}
