use gatehouse_utils::{normalize_path, prepend_slash};
use std::fmt;
use std::path::{Path, PathBuf};

/// Request path used for resolution.
/// Always starts with exactly one `/` and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestPath(String);

impl RequestPath {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize_path(raw);
        Self(prepend_slash(normalized.trim_start_matches('/')))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RequestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered root directories, highest precedence first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootDirectories(Vec<PathBuf>);

impl RootDirectories {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self(roots)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for RootDirectories {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Sanctioned directories a resolved file must live under,
/// checked independently of the roots it was found in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(Vec<PathBuf>);

impl AllowList {
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for AllowList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A file that passed both the root and the allow-list checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    /// Canonical absolute path on disk
    pub path: PathBuf,
    pub request_path: RequestPath,
    /// Milliseconds since the Unix epoch, 0 when unknown
    pub last_modified: i64,
    pub content_type: Option<String>,
    /// Entry page; responses for it must never be cached
    pub default_document: bool,
}

/// Client supplied `If-Modified-Since`, in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionalState(Option<i64>);

impl ConditionalState {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn since(millis: i64) -> Self {
        Self(Some(millis))
    }

    pub fn if_modified_since(&self) -> Option<i64> {
        self.0
    }

    /// Timestamp in milliseconds, or -1 when the client sent none
    pub fn millis(&self) -> i64 {
        self.0.unwrap_or(-1)
    }
}

/// Outcome of resolving one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not ours to answer; the caller keeps ownership of the request
    NotHandled,
    /// Mount path requested without a trailing separator
    Redirect,
    NotModified(ResolvedResource),
    Modified(ResolvedResource),
}

impl Resolution {
    pub fn resource(&self) -> Option<&ResolvedResource> {
        match self {
            Resolution::NotModified(resource) | Resolution::Modified(resource) => Some(resource),
            Resolution::NotHandled | Resolution::Redirect => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_single_leading_slash() {
        assert_eq!(RequestPath::new("app/main.js").as_str(), "/app/main.js");
        assert_eq!(RequestPath::new("///app/main.js").as_str(), "/app/main.js");
        assert_eq!(RequestPath::new("\\app\\main.js").as_str(), "/app/main.js");
        assert_eq!(RequestPath::new("").as_str(), "/");
        assert!(RequestPath::new("").is_root());
    }

    #[test]
    fn test_conditional_state_sentinel() {
        assert_eq!(ConditionalState::none().millis(), -1);
        assert_eq!(ConditionalState::since(1_000).millis(), 1_000);
        assert_eq!(ConditionalState::default(), ConditionalState::none());
    }
}
