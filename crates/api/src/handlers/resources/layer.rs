use super::conditional::conditional_state;
use super::response;
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use gatehouse_models::Resolution;
use gatehouse_resolver::delivery::copy_resource;
use gatehouse_resolver::{ResolveError, Route};

/// Serves UI resources for requests under the mount path.
///
/// Everything the mount does not own (other paths, excluded prefixes, or any
/// request while the mount is stopped) is passed on to `next` untouched.
pub async fn ui_layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    // One snapshot for the whole request, even if the config is swapped meanwhile
    let Some(snapshot) = state.mount.current() else {
        return next.run(request).await;
    };

    let path = request.uri().path().to_owned();
    tracing::debug!("serve_resource: {} {:?}", request.method(), path);

    if request.method() != Method::GET && request.method() != Method::HEAD {
        return match state.resolver.route(&snapshot, &path) {
            Ok(Route::NotHandled) => next.run(request).await,
            _ => ApiError::MethodNotAllowed.into_response(),
        };
    }

    let conditional = conditional_state(request.headers());

    let resolution = match state.resolver.resolve(&snapshot, &path, conditional).await {
        Ok(resolution) => resolution,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match resolution {
        Resolution::NotHandled => next.run(request).await,
        Resolution::Redirect => response::redirect_to_mount(&snapshot.context_root),
        Resolution::NotModified(resource) => response::not_modified(&resource),
        Resolution::Modified(resource) => {
            let (reader, length) = match state.resolver.open(&resource).await {
                Ok(opened) => opened,
                Err(e) => return ApiError::from(e).into_response(),
            };

            if length > snapshot.streaming_threshold {
                tracing::debug!("serve_resource: streaming {:?} ({} bytes)", path, length);
                return response::streamed(&resource, reader, length, snapshot.copy_chunk_size);
            }

            let mut body = Vec::with_capacity(length as usize);
            match copy_resource(reader, &mut body, snapshot.copy_chunk_size).await {
                Ok(content_length) => response::modified(&resource, body, content_length),
                Err(e) => ApiError::from(ResolveError::from(e)).into_response(),
            }
        }
    }
}

/// Fallback for requests no handler claimed
pub async fn not_handled() -> Response {
    ApiError::NoHandler.into_response()
}
