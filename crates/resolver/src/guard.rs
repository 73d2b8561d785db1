use gatehouse_filesystem::FileSystem;
use gatehouse_models::AllowList;
use std::path::{Path, PathBuf};

/// Second line of defence after the root check.
///
/// Canonicalizes `located` again instead of trusting the locator's result,
/// and accepts it only when some allow-list entry covers it. Entries that do
/// not exist cover nothing.
pub async fn check(located: &Path, allow_list: &AllowList) -> bool {
    let Some(canonical) = FileSystem::canonical(located).await else {
        return false;
    };

    let mut entries: Vec<PathBuf> = Vec::with_capacity(allow_list.len());
    for entry in allow_list.iter() {
        match FileSystem::canonical(entry).await {
            Some(canonical_entry) => entries.push(canonical_entry),
            None => tracing::debug!("guard: allow-list entry '{}' unavailable", entry.display()),
        }
    }

    is_covered(&canonical, &entries)
}

pub fn is_covered(canonical: &Path, canonical_entries: &[PathBuf]) -> bool {
    canonical_entries.iter().any(|entry| canonical.starts_with(entry))
}
