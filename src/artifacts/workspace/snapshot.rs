//! In-memory picture of a directory
//!
//! The workspace produces a [`DirSnapshot`] when reading the working tree and
//! consumes one when restoring it. Keeping this as plain data lets the tree
//! codec be exercised without touching the file system.

use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotEntry {
    File { name: String, data: Bytes },
    Directory { name: String, snapshot: DirSnapshot },
}

impl SnapshotEntry {
    pub fn file(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        SnapshotEntry::File {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn directory(name: impl Into<String>, snapshot: DirSnapshot) -> Self {
        SnapshotEntry::Directory {
            name: name.into(),
            snapshot,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SnapshotEntry::File { name, .. } | SnapshotEntry::Directory { name, .. } => name,
        }
    }
}

/// Entries of one directory, kept sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl DirSnapshot {
    pub fn new(mut entries: Vec<SnapshotEntry>) -> Self {
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        DirSnapshot { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = &SnapshotEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
