/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn config_watch_debounce_ms() -> u64 {
    500
}

pub fn config_reload_channel_size() -> usize {
    100
}

pub fn ui_enabled() -> bool {
    true
}

/// The system console attaches itself below this path
pub fn excluded_prefixes() -> Vec<String> {
    vec!["/system/console".to_string()]
}

pub fn default_document() -> String {
    "index.html".to_string()
}

pub fn copy_chunk_size() -> usize {
    1024
}

pub fn streaming_threshold_kb() -> u64 {
    256
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Gatehouse Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 8080                          # Server port

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 1000       # Max simultaneous connections

# Hot-reload
config_watch_debounce_ms = 500       # Config file change debounce (milliseconds)
config_reload_channel_size = 100     # Config reload event channel buffer size

# ===============================================================================
# UI RESOURCES
# ===============================================================================
[ui]
enabled = true                       # false = never mount the UI
url_context_root = "/"               # Mount path ("/" or e.g. "/admin")

# Lookup order: extension_dir first, then default_dir
extension_dir = "&{install.dir}/ui/extension"
default_dir = "&{install.dir}/ui/default"

# Every served file must also live under one of these (empty = the two dirs above)
allowed_directories = ["&{install.dir}/ui"]

excluded_prefixes = ["/system/console"]  # Paths left to other handlers
default_document = "index.html"      # Served for "/", never cached
copy_chunk_size = 1024               # Read buffer size when copying files (bytes)
streaming_threshold_kb = 256         # Files >256KB streamed, smaller ones buffered

# ===============================================================================
# PROPERTIES
# ===============================================================================
# Substituted into &{name} placeholders above. Unknown names fall back to the
# environment (exact name, then NAME_WITH_UNDERSCORES).
[properties]
"install.dir" = "."
"#;
