//! Working directory access
//!
//! The workspace translates between the file system and [`DirSnapshot`]s:
//! reading the working tree for commits, and wiping/rewriting it for
//! checkouts. Paths handed to the ignore predicate are relative to the
//! working-tree root. The repository metadata directory is always skipped.

use crate::artifacts::workspace::ignore_rules::{IgnorePredicate, is_metadata_path};
use crate::artifacts::workspace::snapshot::{DirSnapshot, SnapshotEntry};
use crate::errors::{IoResultExt, RepositoryError, Result};
use bytes::Bytes;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every non-ignored regular file and directory under the root
    ///
    /// Symlinks and other special files are skipped. A name that is not
    /// UTF-8 or contains a newline cannot be represented in a tree and fails
    /// with [`RepositoryError::UnsupportedPath`].
    pub fn snapshot(&self, ignore: &dyn IgnorePredicate) -> Result<DirSnapshot> {
        self.snapshot_dir(Path::new(""), ignore)
    }

    fn snapshot_dir(&self, relative_dir: &Path, ignore: &dyn IgnorePredicate) -> Result<DirSnapshot> {
        let mut entries = Vec::new();

        for dir_entry in self.read_dir(relative_dir)? {
            let relative_path = relative_dir.join(dir_entry.file_name());

            if Self::is_excluded(&relative_path, ignore) {
                continue;
            }

            let file_type = dir_entry.file_type().with_path(&dir_entry.path())?;
            if file_type.is_symlink() || !(file_type.is_file() || file_type.is_dir()) {
                tracing::trace!(path = %relative_path.display(), "skipping special file");
                continue;
            }

            let name = Self::entry_name(&dir_entry, &relative_path)?;

            if file_type.is_dir() {
                entries.push(SnapshotEntry::directory(
                    name,
                    self.snapshot_dir(&relative_path, ignore)?,
                ));
            } else {
                let data = std::fs::read(dir_entry.path()).with_path(&dir_entry.path())?;
                entries.push(SnapshotEntry::file(name, Bytes::from(data)));
            }
        }

        Ok(DirSnapshot::new(entries))
    }

    /// Delete everything under the root that is not ignored
    ///
    /// Ignored paths survive together with the directories leading to them.
    /// Symlinks are unlinked, never followed. The root itself is never
    /// removed, and a missing root has nothing to delete.
    pub fn rm_rf(&self, ignore: &dyn IgnorePredicate) -> Result<()> {
        if !self.path.is_dir() {
            return Ok(());
        }

        self.rm_rf_dir(Path::new(""), ignore)?;

        Ok(())
    }

    /// Returns whether anything was kept inside `relative_dir`
    fn rm_rf_dir(&self, relative_dir: &Path, ignore: &dyn IgnorePredicate) -> Result<bool> {
        let mut kept_any = false;

        for dir_entry in self.read_dir(relative_dir)? {
            let relative_path = relative_dir.join(dir_entry.file_name());
            let absolute_path = dir_entry.path();
            let file_type = dir_entry.file_type().with_path(&absolute_path)?;

            if Self::is_excluded(&relative_path, ignore) {
                kept_any = true;
            } else if file_type.is_dir() {
                if self.rm_rf_dir(&relative_path, ignore)? {
                    kept_any = true;
                } else {
                    std::fs::remove_dir(&absolute_path).with_path(&absolute_path)?;
                }
            } else {
                std::fs::remove_file(&absolute_path).with_path(&absolute_path)?;
            }
        }

        Ok(kept_any)
    }

    /// Write a snapshot out under the root, creating directories as needed
    ///
    /// Existing files at the same paths are overwritten and a symlink in the
    /// way is replaced; nothing else is deleted.
    pub fn materialize(&self, snapshot: &DirSnapshot) -> Result<()> {
        self.materialize_dir(&self.path, snapshot)
    }

    fn materialize_dir(&self, dir: &Path, snapshot: &DirSnapshot) -> Result<()> {
        std::fs::create_dir_all(dir).with_path(dir)?;

        for entry in snapshot.entries() {
            let entry_path = dir.join(entry.name());
            Self::unlink_symlink(&entry_path)?;

            match entry {
                SnapshotEntry::File { data, .. } => {
                    std::fs::write(&entry_path, data).with_path(&entry_path)?;
                }
                SnapshotEntry::Directory { snapshot, .. } => {
                    self.materialize_dir(&entry_path, snapshot)?;
                }
            }
        }

        Ok(())
    }

    /// Writes must never land outside the root through a link
    fn unlink_symlink(path: &Path) -> Result<()> {
        match std::fs::symlink_metadata(path) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                tracing::debug!(path = %path.display(), "replacing symlink");
                std::fs::remove_file(path).with_path(path)
            }
            _ => Ok(()),
        }
    }

    /// The metadata directory is excluded whatever the predicate says
    fn is_excluded(relative_path: &Path, ignore: &dyn IgnorePredicate) -> bool {
        is_metadata_path(relative_path) || ignore.is_ignored(relative_path)
    }

    /// Directory entries sorted by file name
    fn read_dir(&self, relative_dir: &Path) -> Result<Vec<DirEntry>> {
        let dir_path = self.path.join(relative_dir);

        let mut entries = std::fs::read_dir(&dir_path)
            .with_path(&dir_path)?
            .collect::<std::io::Result<Vec<_>>>()
            .with_path(&dir_path)?;
        entries.sort_by_key(DirEntry::file_name);

        Ok(entries)
    }

    fn entry_name(dir_entry: &DirEntry, relative_path: &Path) -> Result<String> {
        match dir_entry.file_name().into_string() {
            Ok(name) if !name.contains('\n') => Ok(name),
            _ => Err(RepositoryError::UnsupportedPath(PathBuf::from(relative_path))),
        }
    }
}
