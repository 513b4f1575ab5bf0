//! Failure values surfaced by repository operations
//!
//! Every core operation returns [`Result`]. The binary wraps these in `anyhow`
//! for reporting; library callers can match on the variant or on its
//! [`ErrorKind`].

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of a [`RepositoryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    TypeMismatch,
    UnknownRevision,
    InvalidState,
    InvalidInput,
    Corrupt,
    IoFailure,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not a twig repository (or any parent): {0}")]
    NotARepository(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("ref not found: {0}")]
    RefNotFound(String),

    #[error("object {oid} is a {found}, expected a {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        found: ObjectType,
    },

    #[error("unknown revision '{0}'")]
    UnknownRevision(String),

    #[error(transparent)]
    InvalidState(#[from] InvalidState),

    #[error("invalid object id '{0}'")]
    InvalidObjectId(String),

    #[error("invalid ref name '{name}': {reason}")]
    InvalidRefName { name: String, reason: String },

    #[error("unsupported path {0}: names must be valid UTF-8 without newlines")]
    UnsupportedPath(PathBuf),

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("corrupt ref file {path}: {reason}")]
    CorruptRef { path: PathBuf, reason: String },

    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Operations refused because of the current repository state
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidState {
    #[error("cannot commit while HEAD is detached at {0}")]
    DetachedHead(ObjectId),

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    #[error("tag '{0}' already exists")]
    TagExists(String),

    #[error("no commits yet")]
    NoCommits,

    #[error("aborting commit due to empty commit message")]
    EmptyMessage,

    #[error("'{name}' conflicts with existing ref '{existing}'")]
    RefNameConflict { name: String, existing: String },

    #[error("ref {name} moved concurrently (expected {expected}, found {found})")]
    RefMoved {
        name: String,
        expected: String,
        found: String,
    },
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotARepository(_)
            | RepositoryError::ObjectNotFound(_)
            | RepositoryError::RefNotFound(_) => ErrorKind::NotFound,
            RepositoryError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            RepositoryError::UnknownRevision(_) => ErrorKind::UnknownRevision,
            RepositoryError::InvalidState(_) => ErrorKind::InvalidState,
            RepositoryError::InvalidObjectId(_)
            | RepositoryError::InvalidRefName { .. }
            | RepositoryError::UnsupportedPath(_) => ErrorKind::InvalidInput,
            RepositoryError::CorruptObject { .. } | RepositoryError::CorruptRef { .. } => {
                ErrorKind::Corrupt
            }
            RepositoryError::Io { .. } => ErrorKind::IoFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Attach the offending path to a raw I/O error
pub(crate) trait IoResultExt<T> {
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| RepositoryError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
