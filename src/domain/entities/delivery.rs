use crate::domain::value_objects::ids::{AttemptId, FormId, SubmissionId};
use crate::domain::value_objects::timestamps::Timestamp;

/// Response bodies stored on an attempt are clipped to this many characters.
pub const RESPONSE_BODY_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Success,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Success => "success",
            DeliveryStatus::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(DeliveryStatus::Pending),
            "success" => Some(DeliveryStatus::Success),
            "failed" => Some(DeliveryStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeliveryStatus::Success | DeliveryStatus::Failed)
    }
}

/// One recorded delivery attempt for a submission's webhook.
#[derive(Debug, Clone)]
pub struct DeliveryAttempt {
    pub id: AttemptId,
    pub form_id: FormId,
    pub submission_id: SubmissionId,
    pub webhook_url: String,
    pub status: DeliveryStatus,
    pub attempt_count: u32,
    pub response_code: Option<u16>,
    pub response_body: Option<String>,
    pub error_message: Option<String>,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Clip a response body for storage, keeping whole characters.
pub fn truncate_response_body(body: &str) -> String {
    body.chars().take(RESPONSE_BODY_MAX_CHARS).collect()
}
