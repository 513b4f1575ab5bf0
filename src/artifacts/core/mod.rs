//! Shared file-system helpers

use crate::errors::{IoResultExt, RepositoryError, Result};
use std::io::Write;
use std::path::Path;

/// Replace `path` with `content` so that readers see either the old or the
/// new file, never a partial one
///
/// The content goes to a hidden sibling temp file first and is then renamed
/// over the destination. Missing parent directories are created.
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(RepositoryError::UnsupportedPath(path.to_path_buf()));
    };
    std::fs::create_dir_all(parent).with_path(parent)?;

    let temp_path = parent.join(format!(
        ".{}.tmp-{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let written = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|_| std::fs::rename(&temp_path, path));

    if written.is_err() {
        // leftover temp file
        let _ = std::fs::remove_file(&temp_path);
    }

    written.with_path(path)
}
