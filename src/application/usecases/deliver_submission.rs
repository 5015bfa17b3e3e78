// Use case: deliver_submission.

use crate::application::context::AppContext;
use crate::domain::entities::delivery::{DeliveryStatus, truncate_response_body};
use crate::domain::entities::form::Form;
use crate::domain::entities::submission::Submission;
use crate::domain::services::payload::build_payload;
use crate::domain::value_objects::timestamps::Timestamp;
use crate::infrastructure::db::dto::DeliveryAttemptRow;
use crate::infrastructure::db::stores::delivery_attempt_store::DeliveryAttemptRepositoryError;
use crate::infrastructure::http::{DispatchOutcome, WebhookRequest};
use metrics::counter;
use tracing::warn;

/// Runs one delivery sequence: attempt, record, back off, repeat.
pub struct DeliverSubmissionUseCase;

#[derive(Debug)]
pub enum DeliverSubmissionError {
    /// Another sequence already wrote this submission's attempt rows.
    AlreadyInProgress,
}

#[derive(Debug, Clone)]
pub enum DeliverSubmissionResult {
    Delivered { status_code: u16, attempts: u32 },
    Failed { error: String, attempts: u32 },
}

impl DeliverSubmissionUseCase {
    /// Deliver one submission to its form's webhook, retrying with backoff.
    ///
    /// The caller has already confirmed the webhook is enabled and the
    /// submission belongs to the form.
    pub async fn execute(
        ctx: &AppContext,
        form: &Form,
        submission: &Submission,
    ) -> Result<DeliverSubmissionResult, DeliverSubmissionError> {
        // Step 1: Build the payload once; it is identical across attempts.
        let payload = build_payload(form, submission);
        let body = serde_json::to_value(&payload).unwrap_or_default();

        // Step 2: Resolve the target; the trigger has already screened
        // disabled configs, so a missing target is a terminal failure.
        let Some(url) = form.webhook.target() else {
            return Ok(DeliverSubmissionResult::Failed {
                error: "webhook target missing".to_string(),
                attempts: 0,
            });
        };
        let request = WebhookRequest {
            url: url.to_string(),
            method: form.webhook.method,
            headers: form.webhook.headers.clone(),
            body,
        };

        let policy = ctx.retry_policy();
        let max_attempts = policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            // Step 3: Record the attempt as pending before calling out. A
            // conflict means a concurrent sequence owns this submission; any
            // other storage failure downgrades to an unaudited attempt.
            let now = Timestamp::now_utc();
            let mut row = pending_row(form, submission, url, attempt, now);
            let recorded = match ctx.repos.delivery_attempt.insert(&row).await {
                Ok(stored) => {
                    row = stored;
                    true
                }
                Err(DeliveryAttemptRepositoryError::Conflict) => {
                    return Err(DeliverSubmissionError::AlreadyInProgress);
                }
                Err(err) => {
                    warn!(
                        submission_id = %submission.id,
                        attempt,
                        error = ?err,
                        "could not record delivery attempt; delivering unaudited"
                    );
                    false
                }
            };

            // Step 4: One dispatch per attempt; the transport never retries.
            let outcome = ctx.transport.send(&request).await;

            // Step 5: Settle the attempt row and decide whether to go again.
            let now = Timestamp::now_utc();
            if outcome.ok {
                mark_success(&mut row, now, &outcome);
                if recorded {
                    Self::update_row(ctx, &row).await;
                }
                counter!("webhook_deliveries_total", "outcome" => "success").increment(1);
                return Ok(DeliverSubmissionResult::Delivered {
                    status_code: outcome.status_code.unwrap_or_default(),
                    attempts: attempt,
                });
            }

            mark_failed(&mut row, now, &outcome);
            last_error = row.error_message.clone().unwrap_or_default();
            if recorded {
                Self::update_row(ctx, &row).await;
            }

            if policy.can_retry(attempt) {
                // Step 6: Wait out the backoff before the next attempt.
                let delay = policy.next_delay(attempt);
                tokio::time::sleep(std::time::Duration::from_millis(
                    delay.whole_milliseconds().max(0) as u64,
                ))
                .await;
            }
        }

        // Step 7: Attempts exhausted.
        counter!("webhook_deliveries_total", "outcome" => "failed").increment(1);
        Ok(DeliverSubmissionResult::Failed {
            error: last_error,
            attempts: max_attempts,
        })
    }

    async fn update_row(ctx: &AppContext, row: &DeliveryAttemptRow) {
        if let Err(err) = ctx.repos.delivery_attempt.update(row).await {
            warn!(
                attempt_id = %row.id,
                error = ?err,
                "could not settle delivery attempt row"
            );
        }
    }
}

fn pending_row(
    form: &Form,
    submission: &Submission,
    url: &str,
    attempt: u32,
    now: Timestamp,
) -> DeliveryAttemptRow {
    DeliveryAttemptRow {
        id: uuid::Uuid::new_v4(),
        form_id: form.id.0,
        submission_id: submission.id.0,
        webhook_url: url.to_string(),
        status: DeliveryStatus::Pending.as_str().to_string(),
        attempt_count: attempt as i32,
        response_code: None,
        response_body: None,
        error_message: None,
        delivered_at: None,
        created_at: now.as_inner(),
        updated_at: now.as_inner(),
    }
}

fn mark_success(row: &mut DeliveryAttemptRow, now: Timestamp, outcome: &DispatchOutcome) {
    row.status = DeliveryStatus::Success.as_str().to_string();
    row.response_code = outcome.status_code.map(i32::from);
    row.response_body = outcome.body_text.as_deref().map(truncate_response_body);
    row.error_message = None;
    row.delivered_at = Some(now.as_inner());
    row.updated_at = now.as_inner();
}

fn mark_failed(row: &mut DeliveryAttemptRow, now: Timestamp, outcome: &DispatchOutcome) {
    row.status = DeliveryStatus::Failed.as_str().to_string();
    row.response_code = outcome.status_code.map(i32::from);
    row.response_body = outcome.body_text.as_deref().map(truncate_response_body);
    row.error_message = Some(failure_reason(outcome));
    row.delivered_at = None;
    row.updated_at = now.as_inner();
}

fn failure_reason(outcome: &DispatchOutcome) -> String {
    match (outcome.status_code, outcome.error.as_deref()) {
        (Some(status), _) => format!("HTTP {status}"),
        (None, Some(err)) => err.to_string(),
        (None, None) => "request failed".to_string(),
    }
}
