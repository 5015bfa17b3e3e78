use crate::domain::entities::delivery::{DeliveryAttempt, DeliveryStatus};
use crate::domain::value_objects::ids::{AttemptId, FormId, SubmissionId};
use crate::domain::value_objects::timestamps::Timestamp;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DeliveryAttemptRow {
    pub id: uuid::Uuid,
    pub form_id: uuid::Uuid,
    pub submission_id: uuid::Uuid,
    pub webhook_url: String,
    pub status: String,
    pub attempt_count: i32,
    pub response_code: Option<i32>,
    pub response_body: Option<String>,
    pub error_message: Option<String>,
    pub delivered_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct DeliveryAttemptStats {
    pub pending: i64,
    pub success: i64,
    pub failed: i64,
}

impl DeliveryAttemptRow {
    pub fn from_attempt(attempt: &DeliveryAttempt) -> Self {
        Self {
            id: attempt.id.0,
            form_id: attempt.form_id.0,
            submission_id: attempt.submission_id.0,
            webhook_url: attempt.webhook_url.clone(),
            status: attempt.status.as_str().to_string(),
            attempt_count: attempt.attempt_count as i32,
            response_code: attempt.response_code.map(i32::from),
            response_body: attempt.response_body.clone(),
            error_message: attempt.error_message.clone(),
            delivered_at: attempt.delivered_at.map(|t| t.as_inner()),
            created_at: attempt.created_at.as_inner(),
            updated_at: attempt.updated_at.as_inner(),
        }
    }

    pub fn into_attempt(self) -> DeliveryAttempt {
        DeliveryAttempt {
            id: AttemptId(self.id),
            form_id: FormId(self.form_id),
            submission_id: SubmissionId(self.submission_id),
            webhook_url: self.webhook_url,
            status: DeliveryStatus::parse(&self.status).unwrap_or(DeliveryStatus::Failed),
            attempt_count: self.attempt_count as u32,
            response_code: self.response_code.map(|c| c as u16),
            response_body: self.response_body,
            error_message: self.error_message,
            delivered_at: self.delivered_at.map(Timestamp::from),
            created_at: Timestamp::from(self.created_at),
            updated_at: Timestamp::from(self.updated_at),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }
}
