use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::infrastructure::db::dto::{DeliveryAttemptRow, DeliveryAttemptStats};

#[derive(Debug, Deserialize)]
pub struct TriggerDeliveryRequest {
    pub submission_id: Option<String>,
    pub form_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeliveredResponse {
    pub message: &'static str,
    pub status: u16,
}

#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub id: String,
    pub form_id: String,
    pub submission_id: String,
    pub webhook_url: String,
    pub status: String,
    pub attempt_count: i32,
    pub response_code: Option<i32>,
    pub response_body: Option<String>,
    pub error_message: Option<String>,
    pub delivered_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl AttemptResponse {
    pub fn from_row(row: &DeliveryAttemptRow) -> Self {
        Self {
            id: row.id.to_string(),
            form_id: row.form_id.to_string(),
            submission_id: row.submission_id.to_string(),
            webhook_url: row.webhook_url.clone(),
            status: row.status.clone(),
            attempt_count: row.attempt_count,
            response_code: row.response_code,
            response_body: row.response_body.clone(),
            error_message: row.error_message.clone(),
            delivered_at: row
                .delivered_at
                .map(|t| t.format(&Rfc3339).unwrap_or_default()),
            created_at: row.created_at.format(&Rfc3339).unwrap_or_default(),
            updated_at: row.updated_at.format(&Rfc3339).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttemptHistoryResponse {
    pub submission_id: String,
    pub attempts: Vec<AttemptResponse>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub pending: i64,
    pub success: i64,
    pub failed: i64,
}

impl StatsResponse {
    pub fn from_stats(stats: &DeliveryAttemptStats) -> Self {
        Self {
            pending: stats.pending,
            success: stats.success,
            failed: stats.failed,
        }
    }
}
