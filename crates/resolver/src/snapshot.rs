use gatehouse_models::{AllowList, RequestPath, RootDirectories};

pub const DEFAULT_DOCUMENT: &str = "index.html";
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_STREAMING_THRESHOLD: u64 = 256 * 1024;

/// Immutable configuration for one mount. A new value replaces the old one
/// on reconfiguration; a request keeps the snapshot it started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSnapshot {
    pub context_root: String,
    pub roots: RootDirectories,
    pub allow_list: AllowList,
    pub excluded_prefixes: Vec<String>,
    pub default_document: String,
    pub copy_chunk_size: usize,
    /// Bodies above this many bytes are streamed
    pub streaming_threshold: u64,
}

impl ResolverSnapshot {
    pub fn new(context_root: impl Into<String>, roots: RootDirectories, allow_list: AllowList) -> Self {
        Self {
            context_root: context_root.into(),
            roots,
            allow_list,
            excluded_prefixes: Vec::new(),
            default_document: DEFAULT_DOCUMENT.to_string(),
            copy_chunk_size: DEFAULT_CHUNK_SIZE,
            streaming_threshold: DEFAULT_STREAMING_THRESHOLD,
        }
    }

    pub fn with_excluded_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.excluded_prefixes = prefixes;
        self
    }

    pub fn with_default_document(mut self, document: impl Into<String>) -> Self {
        self.default_document = document.into();
        self
    }

    pub fn with_copy_chunk_size(mut self, size: usize) -> Self {
        self.copy_chunk_size = size.max(1);
        self
    }

    pub fn with_streaming_threshold(mut self, bytes: u64) -> Self {
        self.streaming_threshold = bytes;
        self
    }

    pub fn is_excluded(&self, path: &RequestPath) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| path.as_str().starts_with(prefix.as_str()))
    }

    pub fn is_default_document(&self, path: &RequestPath) -> bool {
        path.as_str().strip_prefix('/') == Some(self.default_document.as_str())
    }
}
