use gatehouse_filesystem::FileSystem;
use gatehouse_models::{RequestPath, RootDirectories};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Finds `path` under the first root that contains it as a regular file.
///
/// Candidates are checked after canonicalization, so `..` segments and
/// symlinks pointing out of a root are rejected for that root. A root that
/// cannot be canonicalized (missing, unreadable) is skipped.
/// Returns the canonical path of the match.
pub async fn locate(path: &RequestPath, roots: &RootDirectories) -> Option<PathBuf> {
    for root in roots.iter() {
        let Some(canonical_root) = FileSystem::canonical(root).await else {
            tracing::debug!("locate: skipping unavailable root '{}'", root.display());
            continue;
        };

        let candidate = join_raw(root, path);
        let Some(canonical) = FileSystem::canonical(&candidate).await else {
            continue;
        };

        if !is_contained(&canonical, &canonical_root) {
            tracing::warn!("locate: {:?} escapes its root, ignoring", path.as_str());
            continue;
        }

        if FileSystem::is_servable_file(&canonical).await {
            return Some(canonical);
        }
    }

    None
}

/// Component-wise prefix test on two canonical paths
pub fn is_contained(canonical: &Path, canonical_root: &Path) -> bool {
    canonical.starts_with(canonical_root)
}

/// Root followed by the request path, verbatim.
/// `Path::join` would discard the root since the request path is absolute.
fn join_raw(root: &Path, path: &RequestPath) -> PathBuf {
    let mut joined = OsString::from(root.as_os_str());
    joined.push(path.as_str());
    PathBuf::from(joined)
}
