use axum::http::{header, HeaderMap};
use gatehouse_models::ConditionalState;
use gatehouse_utils::parse_http_date;

/// Reads `If-Modified-Since`; a missing or unparsable header counts as none
pub fn conditional_state(headers: &HeaderMap) -> ConditionalState {
    headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date)
        .map(ConditionalState::since)
        .unwrap_or_default()
}
