use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    pub ui: UiSettings,
    /// Values for `&{name}` placeholders in directory settings
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::config_watch_debounce_ms")]
    pub config_watch_debounce_ms: u64,
    #[serde(default = "super::defaults::config_reload_channel_size")]
    pub config_reload_channel_size: usize,
}

/// UI resource settings. The three directory/mount fields are optional on
/// purpose: a config without them loads fine but never registers the UI.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UiSettings {
    #[serde(default = "super::defaults::ui_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub url_context_root: Option<String>,
    #[serde(default)]
    pub default_dir: Option<String>,
    #[serde(default)]
    pub extension_dir: Option<String>,
    #[serde(default)]
    pub allowed_directories: Vec<String>,
    #[serde(default = "super::defaults::excluded_prefixes")]
    pub excluded_prefixes: Vec<String>,
    #[serde(default = "super::defaults::default_document")]
    pub default_document: String,
    #[serde(default = "super::defaults::copy_chunk_size")]
    pub copy_chunk_size: usize,
    /// Files larger than this are streamed instead of copied into memory
    #[serde(default = "super::defaults::streaming_threshold_kb")]
    pub streaming_threshold_kb: u64,
}
