// HTTP routes: webhook delivery trigger and reporting.

use crate::application::usecases::delivery_stats::{DeliveryStatsError, DeliveryStatsUseCase};
use crate::application::usecases::list_attempts::{ListAttemptsError, ListAttemptsUseCase};
use crate::application::usecases::trigger_delivery::{
    TriggerDeliveryCommand, TriggerDeliveryError, TriggerDeliveryOutcome, TriggerDeliveryUseCase,
};
use crate::interface::http::dto::delivery::{
    AttemptHistoryResponse, AttemptResponse, DeliveredResponse, StatsResponse,
    TriggerDeliveryRequest,
};
use crate::interface::http::respond;
use crate::interface::http::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

/// Builds delivery routes.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/deliveries", post(trigger_delivery))
        .route("/deliveries/stats", get(delivery_stats))
        .route(
            "/submissions/:submission_id/deliveries",
            get(list_attempts),
        )
}

/// Triggers the webhook delivery pipeline for one submission.
async fn trigger_delivery(
    State(state): State<AppState>,
    Json(payload): Json<TriggerDeliveryRequest>,
) -> Response {
    // Step 1: Both identifiers must be present and non-blank.
    let (Some(submission_id), Some(form_id)) = (
        payload.submission_id.as_deref().map(str::trim),
        payload.form_id.as_deref().map(str::trim),
    ) else {
        return respond::error(StatusCode::BAD_REQUEST, "Missing submission_id or form_id");
    };
    if submission_id.is_empty() || form_id.is_empty() {
        return respond::error(StatusCode::BAD_REQUEST, "Missing submission_id or form_id");
    }

    // Step 2: Parse identifiers.
    let (Ok(submission_id), Ok(form_id)) = (
        uuid::Uuid::parse_str(submission_id),
        uuid::Uuid::parse_str(form_id),
    ) else {
        return respond::error(StatusCode::BAD_REQUEST, "Invalid submission_id or form_id");
    };

    // Step 3: Execute the use case.
    let result = TriggerDeliveryUseCase::execute(
        &state.ctx,
        TriggerDeliveryCommand {
            submission_id,
            form_id,
        },
    )
    .await;

    // Step 4: Map output to HTTP response.
    match result {
        Ok(TriggerDeliveryOutcome::Skipped) => {
            respond::message(StatusCode::OK, "Webhooks not enabled")
        }
        Ok(TriggerDeliveryOutcome::Delivered { status_code, .. }) => (
            StatusCode::OK,
            Json(DeliveredResponse {
                message: "Webhook delivered successfully",
                status: status_code,
            }),
        )
            .into_response(),
        Ok(TriggerDeliveryOutcome::Failed { error, .. }) => respond::error_with_details(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Webhook delivery failed",
            &error,
        ),
        Err(TriggerDeliveryError::FormNotFound) => {
            respond::error(StatusCode::NOT_FOUND, "Form not found")
        }
        Err(TriggerDeliveryError::SubmissionNotFound) => {
            respond::error(StatusCode::NOT_FOUND, "Submission not found")
        }
        Err(TriggerDeliveryError::InvalidData(details)) => respond::error_with_details(
            StatusCode::BAD_REQUEST,
            "Invalid submission data",
            &details,
        ),
        Err(TriggerDeliveryError::AlreadyInProgress) => respond::error(
            StatusCode::CONFLICT,
            "Webhook delivery already in progress",
        ),
        Err(TriggerDeliveryError::Storage(_)) => {
            respond::error(StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
        }
    }
}

/// Lists the delivery attempt history for a submission.
async fn list_attempts(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Response {
    // Step 1: Parse the submission id.
    let Ok(submission_id) = uuid::Uuid::parse_str(&submission_id) else {
        return respond::error(StatusCode::BAD_REQUEST, "Invalid submission_id");
    };

    // Step 2: Execute the use case.
    let result = ListAttemptsUseCase::execute(&state.ctx, submission_id).await;

    // Step 3: Map output to HTTP response.
    match result {
        Ok(rows) => {
            let response = AttemptHistoryResponse {
                submission_id: submission_id.to_string(),
                attempts: rows.iter().map(AttemptResponse::from_row).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(ListAttemptsError::Storage(_)) => {
            respond::error(StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
        }
    }
}

/// Reports delivery attempt counts grouped by status.
async fn delivery_stats(State(state): State<AppState>) -> Response {
    match DeliveryStatsUseCase::execute(&state.ctx).await {
        Ok(stats) => (StatusCode::OK, Json(StatsResponse::from_stats(&stats))).into_response(),
        Err(DeliveryStatsError::Storage(_)) => {
            respond::error(StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
        }
    }
}
