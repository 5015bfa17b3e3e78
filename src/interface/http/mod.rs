pub mod dto;
pub mod respond;
pub mod routes;
pub mod state;
pub mod trace;

use axum::Router;

use state::AppState;

/// Builds the full HTTP application with middleware layers applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::ready::router())
        .merge(routes::metrics::router())
        .merge(routes::deliveries::router())
        // Outermost first: the trace id must exist before the request log reads it.
        .layer(axum::middleware::from_fn(trace::request_log_middleware))
        .layer(axum::middleware::from_fn(trace::trace_id_middleware))
        .with_state(state)
}
