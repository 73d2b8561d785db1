use super::ui_layer;
use crate::handlers::AppState;
use crate::mount::UiMount;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    middleware,
    response::Response,
    Router,
};
use gatehouse_config::Config;
use gatehouse_events::EventBus;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;
use tower::ServiceExt;

const T_SECS: u64 = 1_700_000_000;
const T_HTTP_DATE: &str = "Tue, 14 Nov 2023 22:13:20 GMT";
const T_MINUS_ONE_HTTP_DATE: &str = "Tue, 14 Nov 2023 22:13:19 GMT";

struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        let site = Self {
            dir: TempDir::new().unwrap(),
        };
        site.write("ui/default/index.html", b"<html>default</html>");
        site.write("ui/default/js/main.js", b"console.log('default')");
        site.write("ui/default/img/logo.png", &[0x89, b'P', b'N', b'G', 0, 1, 2, 3]);
        site.write("ui/extension/js/main.js", b"console.log('override')");
        site.write("private/secret.txt", b"top secret");
        site
    }

    fn base(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, relative: &str, content: &[u8]) {
        let path = self.base().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(T_SECS)).unwrap();
    }

    fn config(&self, context_root: &str, roots: (&str, &str), allowed: &str) -> Config {
        let at = |relative: &str| -> PathBuf { self.base().join(relative) };
        let toml = format!(
            "[server]\nhost = \"127.0.0.1\"\nport = 0\n\n[ui]\nurl_context_root = \"{}\"\nextension_dir = '{}'\ndefault_dir = '{}'\nallowed_directories = ['{}']\n",
            context_root,
            at(roots.0).display(),
            at(roots.1).display(),
            at(allowed).display(),
        );
        toml::from_str(&toml).unwrap()
    }

    fn mount(&self, context_root: &str) -> Arc<UiMount> {
        UiMount::start(
            &self.config(context_root, ("ui/extension", "ui/default"), "ui"),
            &EventBus::new(true),
        )
    }
}

fn app(mount: Arc<UiMount>) -> Router {
    Router::new()
        .fallback(|| async { (StatusCode::IM_A_TEAPOT, "container") })
        .layer(middleware::from_fn_with_state(AppState::new(mount), ui_layer))
}

async fn send(mount: &Arc<UiMount>, method: Method, uri: &str, if_modified_since: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(date) = if_modified_since {
        builder = builder.header(header::IF_MODIFIED_SINCE, date);
    }
    app(Arc::clone(mount))
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get(mount: &Arc<UiMount>, uri: &str) -> Response {
    send(mount, Method::GET, uri, None).await
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_default_document() {
    let site = Site::new();
    let mount = site.mount("/");

    let response = get(&mount, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, header::CACHE_CONTROL), Some("no-cache"));
    assert_eq!(header_str(&response, header::CONTENT_TYPE), Some("text/html"));
    assert_eq!(header_str(&response, header::LAST_MODIFIED), Some(T_HTTP_DATE));
    assert_eq!(header_str(&response, header::CONTENT_LENGTH), Some("20"));
    assert_eq!(body_bytes(response).await, b"<html>default</html>");
}

#[tokio::test]
async fn test_other_assets_are_cacheable() {
    let site = Site::new();
    let mount = site.mount("/");

    let response = get(&mount, "/img/logo.png").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    assert_eq!(header_str(&response, header::CONTENT_TYPE), Some("image/png"));
    assert_eq!(body_bytes(response).await, vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3]);
}

#[tokio::test]
async fn test_conditional_get() {
    let site = Site::new();
    let mount = site.mount("/");

    let same = send(&mount, Method::GET, "/js/main.js", Some(T_HTTP_DATE)).await;
    assert_eq!(same.status(), StatusCode::NOT_MODIFIED);
    assert!(body_bytes(same).await.is_empty());

    let older = send(&mount, Method::GET, "/js/main.js", Some(T_MINUS_ONE_HTTP_DATE)).await;
    assert_eq!(older.status(), StatusCode::OK);
    assert_eq!(body_bytes(older).await, b"console.log('override')");

    let garbage = send(&mount, Method::GET, "/js/main.js", Some("whenever")).await;
    assert_eq!(garbage.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_default_document_not_modified_keeps_no_cache() {
    let site = Site::new();
    let mount = site.mount("/");

    let response = send(&mount, Method::GET, "/index.html", Some(T_HTTP_DATE)).await;

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(header_str(&response, header::CACHE_CONTROL), Some("no-cache"));
}

#[tokio::test]
async fn test_override_root_wins() {
    let site = Site::new();
    let mount = site.mount("/");

    let response = get(&mount, "/js/main.js").await;
    assert_eq!(body_bytes(response).await, b"console.log('override')");
}

#[tokio::test]
async fn test_traversal_is_not_found() {
    let site = Site::new();
    let mount = site.mount("/");

    for uri in [
        "/../../private/secret.txt",
        "/%2e%2e/%2e%2e/private/secret.txt",
        "/js/..%2f..%2f..%2fprivate%2fsecret.txt",
    ] {
        let response = get(&mount, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_root_outside_allow_list_is_forbidden() {
    let site = Site::new();
    let config = site.config("/", ("private", "ui/default"), "ui");
    let mount = UiMount::start(&config, &EventBus::new(true));

    let response = get(&mount, "/secret.txt").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("FORBIDDEN"));
    assert!(!body.contains(&site.base().display().to_string()));

    // Still found and allowed through the second root
    assert_eq!(get(&mount, "/index.html").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_is_not_found() {
    let site = Site::new();
    let mount = site.mount("/");

    assert_eq!(get(&mount, "/nope.css").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&mount, "/js").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_excluded_prefix_is_passed_on() {
    let site = Site::new();
    let mount = site.mount("/");

    for uri in ["/system/console", "/system/console/bundles"] {
        let response = get(&mount, uri).await;
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT, "{}", uri);
        assert_eq!(body_bytes(response).await, b"container");
    }
}

#[tokio::test]
async fn test_sub_mount() {
    let site = Site::new();
    let mount = site.mount("/admin");

    let redirect = get(&mount, "/admin").await;
    assert_eq!(redirect.status(), StatusCode::FOUND);
    assert_eq!(header_str(&redirect, header::LOCATION), Some("/admin/"));

    let index = get(&mount, "/admin/").await;
    assert_eq!(index.status(), StatusCode::OK);
    assert_eq!(header_str(&index, header::CACHE_CONTROL), Some("no-cache"));

    assert_eq!(get(&mount, "/admin/js/main.js").await.status(), StatusCode::OK);
    assert_eq!(get(&mount, "/js/main.js").await.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(get(&mount, "/administrator").await.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn test_stopped_mount_handles_nothing() {
    let site = Site::new();
    let mount = site.mount("/");
    mount.stop();

    assert_eq!(get(&mount, "/").await.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn test_reconfiguration_applies_to_next_request() {
    let site = Site::new();
    let mount = site.mount("/");
    assert_eq!(get(&mount, "/js/main.js").await.status(), StatusCode::OK);

    mount.modify(&site.config("/admin", ("ui/extension", "ui/default"), "ui"));

    assert_eq!(get(&mount, "/js/main.js").await.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(get(&mount, "/admin/js/main.js").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_methods() {
    let site = Site::new();
    let mount = site.mount("/");

    let head = send(&mount, Method::HEAD, "/js/main.js", None).await;
    assert_eq!(head.status(), StatusCode::OK);

    let post = send(&mount, Method::POST, "/js/main.js", None).await;
    assert_eq!(post.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(header_str(&post, header::ALLOW), Some("GET, HEAD"));

    let console = send(&mount, Method::POST, "/system/console/action", None).await;
    assert_eq!(console.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn test_large_file_is_streamed_byte_exact() {
    let site = Site::new();
    let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    site.write("ui/default/assets/bundle.js", &payload);

    let mut config = site.config("/", ("ui/extension", "ui/default"), "ui");
    config.ui.streaming_threshold_kb = 1;
    config.ui.copy_chunk_size = 333;
    let mount = UiMount::start(&config, &EventBus::new(true));

    let response = get(&mount, "/assets/bundle.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, header::CONTENT_LENGTH), Some("10000"));
    assert_eq!(header_str(&response, header::LAST_MODIFIED), Some(T_HTTP_DATE));
    assert_eq!(body_bytes(response).await, payload);
}

#[tokio::test]
async fn test_file_at_threshold_is_buffered() {
    let site = Site::new();
    let payload = vec![b'x'; 1024];
    site.write("ui/default/assets/exact.txt", &payload);

    let mut config = site.config("/", ("ui/extension", "ui/default"), "ui");
    config.ui.streaming_threshold_kb = 1;
    let mount = UiMount::start(&config, &EventBus::new(true));

    let response = get(&mount, "/assets/exact.txt").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, header::CONTENT_LENGTH), Some("1024"));
    assert_eq!(body_bytes(response).await, payload);
}
