use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// JSON response helpers for the delivery boundary.
///
/// The boundary speaks a flat shape: successes carry `message` (plus
/// whatever extras the route adds), failures carry `error` with an optional
/// `details` string.

pub fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

pub fn error(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "error": text }))).into_response()
}

pub fn error_with_details(status: StatusCode, text: &str, details: &str) -> Response {
    (
        status,
        Json(json!({ "error": text, "details": details })),
    )
        .into_response()
}
