use super::models::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

impl FileSystem {
    /// Resolves symlinks and `.`/`..` segments.
    /// Any failure (missing file, bad component, permissions) yields `None`.
    pub async fn canonical(path: &Path) -> Option<PathBuf> {
        match fs::canonicalize(path).await {
            Ok(canonical) => Some(canonical),
            Err(e) => {
                tracing::trace!("canonicalize failed for '{}': {}", path.display(), e);
                None
            }
        }
    }

    /// Exists and is a regular file. FIFOs, sockets and device nodes are
    /// rejected before anything tries to open them.
    pub async fn is_servable_file(path: &Path) -> bool {
        match fs::metadata(path).await {
            Ok(metadata) => metadata.is_file(),
            Err(_) => false,
        }
    }

    pub async fn is_directory(path: &Path) -> bool {
        fs::metadata(path)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    }

    /// Modification time in epoch milliseconds.
    /// Reads the open handle's metadata first, then the path's stored
    /// metadata, and finally gives up with 0.
    pub async fn last_modified_millis(path: &Path) -> i64 {
        let from_handle = match fs::File::open(path).await {
            Ok(file) => match file.metadata().await {
                Ok(metadata) => metadata.modified().map(to_millis).unwrap_or(0),
                Err(_) => 0,
            },
            Err(_) => 0,
        };

        if from_handle != 0 {
            return from_handle;
        }

        match fs::metadata(path).await {
            Ok(metadata) => metadata.modified().map(to_millis).unwrap_or(0),
            Err(_) => 0,
        }
    }

    fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }
}

fn to_millis(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
