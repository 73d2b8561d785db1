use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use gatehouse_models::ResolvedResource;
use gatehouse_utils::format_http_date;
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

/// `302 Found` pointing at the mount path with a trailing separator
pub fn redirect_to_mount(context_root: &str) -> Response {
    let location = format!("{}/", context_root.trim_end_matches('/'));
    match HeaderValue::from_str(&location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn not_modified(resource: &ResolvedResource) -> Response {
    (StatusCode::NOT_MODIFIED, resource_headers(resource)).into_response()
}

/// Full response once the body has been copied and its length is known
pub fn modified(resource: &ResolvedResource, body: Vec<u8>, content_length: u64) -> Response {
    let mut headers = resource_headers(resource);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));

    (StatusCode::OK, headers, Body::from(Bytes::from(body))).into_response()
}

/// Full response whose body is read from `reader` while it is sent.
/// `content_length` comes from the file metadata.
pub fn streamed<R>(
    resource: &ResolvedResource,
    reader: R,
    content_length: u64,
    chunk_size: usize,
) -> Response
where
    R: AsyncRead + Send + 'static,
{
    let mut headers = resource_headers(resource);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));

    let stream = ReaderStream::with_capacity(reader, chunk_size.max(1));
    (StatusCode::OK, headers, Body::from_stream(stream)).into_response()
}

fn resource_headers(resource: &ResolvedResource) -> HeaderMap {
    let mut headers = HeaderMap::new();

    // The entry page is where clients discover the current asset versions
    if resource.default_document {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    }

    if let Some(content_type) = &resource.content_type {
        match HeaderValue::from_str(content_type) {
            Ok(value) => {
                headers.insert(header::CONTENT_TYPE, value);
            }
            Err(_) => tracing::warn!("serve_resource: unusable content type '{}'", content_type),
        }
    }

    if resource.last_modified != 0 {
        if let Some(value) = format_http_date(resource.last_modified)
            .and_then(|date| HeaderValue::from_str(&date).ok())
        {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }

    headers
}
