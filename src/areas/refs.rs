//! References (HEAD, branches, tags)
//!
//! This module manages the named pointers into the commit graph:
//!
//! - HEAD: the current checkout pointer
//! - Branches: `refs/heads/*`, moved by commits
//! - Tags: `refs/tags/*`, written once and never moved
//!
//! ## File Format
//!
//! Branch and tag files contain a single object ID in ASCII hex. HEAD
//! contains either a branch name (attached), an object ID (detached) or
//! nothing (fresh repository).
//!
//! ## Concurrency
//!
//! Every mutation runs while holding an exclusive advisory lock on
//! `refs.lock`, re-reads the current value under that lock, and writes
//! through a temp file + rename. Creation is create-if-absent and updates
//! are compare-and-swap, so two writers can never silently overwrite each
//! other.

use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::core::write_atomically;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{InvalidState, IoResultExt, RepositoryError, Result};
use derive_new::new;
use file_guard::Lock;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the HEAD reference file
pub const HEAD_REF_NAME: &str = "HEAD";

const REFS_DIR: &str = "refs";
const LOCK_FILE: &str = "refs.lock";

/// Where HEAD points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Fresh repository, nothing committed or checked out yet
    Unset,
    /// On a branch; the branch itself may not exist yet (unborn)
    Attached(RefName),
    /// On a raw commit
    Detached(ObjectId),
}

impl Head {
    fn parse(content: &str, path: &Path) -> Result<Self> {
        let content = content.trim();

        if content.is_empty() {
            Ok(Head::Unset)
        } else if ObjectId::is_object_id(content) {
            Ok(Head::Detached(ObjectId::try_parse(content)?))
        } else {
            RefName::try_parse(content)
                .map(Head::Attached)
                .map_err(|_| RepositoryError::CorruptRef {
                    path: path.to_path_buf(),
                    reason: format!("'{content}' is neither a branch name nor an object id"),
                })
        }
    }

    fn serialize(&self) -> String {
        match self {
            Head::Unset => String::new(),
            Head::Attached(branch) => branch.to_string(),
            Head::Detached(oid) => oid.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefNamespace {
    Heads,
    Tags,
}

impl RefNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefNamespace::Heads => "heads",
            RefNamespace::Tags => "tags",
        }
    }

    fn conflict(&self, name: &RefName) -> InvalidState {
        match self {
            RefNamespace::Heads => InvalidState::BranchExists(name.to_string()),
            RefNamespace::Tags => InvalidState::TagExists(name.to_string()),
        }
    }
}

/// References manager
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository metadata directory
    path: Box<Path>,
}

impl Refs {
    /// Read HEAD without resolving it
    pub fn read_head(&self) -> Result<Head> {
        let head_path = self.head_path();

        if !head_path.exists() {
            return Ok(Head::Unset);
        }

        let content = std::fs::read_to_string(&head_path).with_path(&head_path)?;
        Head::parse(&content, &head_path)
    }

    pub fn set_head(&self, head: &Head) -> Result<()> {
        self.with_lock(|| write_atomically(&self.head_path(), head.serialize().as_bytes()))?;
        tracing::debug!(head = %head.serialize(), "updated HEAD");

        Ok(())
    }

    /// Commit HEAD currently points at, if any
    pub fn resolve_head(&self) -> Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Unset => Ok(None),
            Head::Attached(branch) => self.read_ref(RefNamespace::Heads, &branch),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    pub fn read_ref(&self, namespace: RefNamespace, name: &RefName) -> Result<Option<ObjectId>> {
        let ref_path = self.ref_path(namespace, name);

        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path).with_path(&ref_path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content)
            .map(Some)
            .map_err(|_| RepositoryError::CorruptRef {
                path: ref_path.clone(),
                reason: format!("'{content}' is not an object id"),
            })
    }

    pub fn ref_exists(&self, namespace: RefNamespace, name: &RefName) -> bool {
        self.ref_path(namespace, name).is_file()
    }

    /// Create a ref that must not exist yet
    ///
    /// An existing branch or tag of the same name is reported as
    /// [`InvalidState::BranchExists`] / [`InvalidState::TagExists`] and left
    /// untouched.
    pub fn create_ref(&self, namespace: RefNamespace, name: &RefName, oid: &ObjectId) -> Result<()> {
        self.with_lock(|| {
            if self.ref_exists(namespace, name) {
                return Err(namespace.conflict(name).into());
            }
            self.check_hierarchy(namespace, name)?;

            write_atomically(&self.ref_path(namespace, name), oid.as_ref().as_bytes())
        })?;
        tracing::debug!(namespace = namespace.as_str(), name = %name, %oid, "created ref");

        Ok(())
    }

    /// Move a ref from `expected` to `oid`
    ///
    /// `expected == None` means the ref must not exist yet. If another
    /// writer moved the ref in between, nothing is written and
    /// [`InvalidState::RefMoved`] is returned.
    pub fn update_ref(
        &self,
        namespace: RefNamespace,
        name: &RefName,
        oid: &ObjectId,
        expected: Option<&ObjectId>,
    ) -> Result<()> {
        self.with_lock(|| {
            let current = self.read_ref(namespace, name)?;

            if current.as_ref() != expected {
                let describe =
                    |oid: Option<&ObjectId>| oid.map_or("nothing".to_string(), ToString::to_string);

                return Err(InvalidState::RefMoved {
                    name: format!("{REFS_DIR}/{}/{name}", namespace.as_str()),
                    expected: describe(expected),
                    found: describe(current.as_ref()),
                }
                .into());
            }
            self.check_hierarchy(namespace, name)?;

            write_atomically(&self.ref_path(namespace, name), oid.as_ref().as_bytes())
        })?;
        tracing::debug!(namespace = namespace.as_str(), name = %name, %oid, "updated ref");

        Ok(())
    }

    /// All refs of a namespace, sorted by name
    pub fn list_refs(&self, namespace: RefNamespace) -> Result<Vec<RefName>> {
        let namespace_path = self.namespace_path(namespace);

        let mut names = WalkDir::new(&namespace_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&namespace_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_str())
                    .collect::<Option<Vec<_>>>()?
                    .join("/");

                // skips in-flight temp files as well as foreign junk
                RefName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();

        names.sort();
        Ok(names)
    }

    /// `a` and `a/b` cannot both exist: one would be a file, the other a
    /// directory
    fn check_hierarchy(&self, namespace: RefNamespace, name: &RefName) -> Result<()> {
        let conflict = |existing: String| InvalidState::RefNameConflict {
            name: name.to_string(),
            existing,
        };

        let components = name.as_ref().split('/').collect::<Vec<_>>();
        for depth in 1..components.len() {
            let prefix = components[..depth].join("/");
            if self.namespace_path(namespace).join(&prefix).is_file() {
                return Err(conflict(prefix).into());
            }
        }

        let ref_path = self.ref_path(namespace, name);
        if ref_path.is_dir() {
            let nested = WalkDir::new(&ref_path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .find(|entry| entry.file_type().is_file())
                .and_then(|entry| {
                    let relative = entry.path().strip_prefix(&ref_path).ok()?;
                    Some(format!("{name}/{}", relative.to_str()?))
                })
                .unwrap_or_else(|| format!("{name}/"));

            return Err(conflict(nested).into());
        }

        Ok(())
    }

    fn with_lock<T>(&self, operation: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock_path = self.path.join(LOCK_FILE);
        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_path(&lock_path)?;
        let _guard = file_guard::lock(&lock_file, Lock::Exclusive, 0, 1).with_path(&lock_path)?;

        operation()
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join(REFS_DIR)
    }

    pub fn namespace_path(&self, namespace: RefNamespace) -> PathBuf {
        self.refs_path().join(namespace.as_str())
    }

    fn ref_path(&self, namespace: RefNamespace, name: &RefName) -> PathBuf {
        self.namespace_path(namespace).join(name.as_ref())
    }
}
