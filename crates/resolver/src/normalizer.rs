//! Pure string handling; nothing in here touches the filesystem or rejects input.

use gatehouse_models::RequestPath;

/// What the normalizer made of the raw target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Nothing after the mount path: the client should come back with a trailing `/`
    Redirect,
    Path(RequestPath),
}

/// Where a request sits relative to the mount path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget<'a> {
    Outside,
    /// Remainder after the mount path; `None` when the request is the mount path itself
    Inside(Option<&'a str>),
}

/// Splits the mount path off a request path.
///
/// A root mount sees the whole request path. Any other mount sees what follows
/// it, and only when the next character is a separator (`/ui` does not own `/uix`).
pub fn mount_target<'a>(request_path: &'a str, context_root: &str) -> MountTarget<'a> {
    if context_root == "/" {
        return MountTarget::Inside(Some(request_path).filter(|p| !p.is_empty()));
    }

    match request_path.strip_prefix(context_root) {
        Some("") => MountTarget::Inside(None),
        Some(rest) if rest.starts_with('/') => MountTarget::Inside(Some(rest)),
        _ => MountTarget::Outside,
    }
}

/// Canonical request path for a raw target.
/// `/` maps to the default document.
pub fn normalize(raw: Option<&str>, default_document: &str) -> Target {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Target::Redirect,
    };

    let path = RequestPath::new(raw);
    if path.is_root() {
        return Target::Path(RequestPath::new(default_document));
    }

    Target::Path(path)
}
