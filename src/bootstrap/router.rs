use gatehouse_api::{not_handled, ui_layer, AppState};
use gatehouse_config::Config;
use axum::{http::StatusCode, middleware, Router};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// The UI sits in front of the container's own fallback; whatever the UI does
/// not claim ends up there.
pub fn build(config: &Config, app_state: AppState) -> Router {
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_concurrent_requests = config.server.max_concurrent_requests;

    Router::new()
        .fallback(not_handled)
        .layer(middleware::from_fn_with_state(app_state, ui_layer))
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(TraceLayer::new_for_http())
}
