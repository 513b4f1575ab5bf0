//! Object identifier (SHA-256 digest)
//!
//! Object IDs are 64-character lowercase hexadecimal strings. They are the
//! digest of `<type> NUL <content>` and name the object's file directly:
//! `objects/<id>` in a flat namespace.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::RepositoryError;
use std::path::PathBuf;

/// Length of the abbreviated form used in human-facing output
const SHORT_OID_LENGTH: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID, normalizing it to lowercase
    pub fn try_parse(id: impl AsRef<str>) -> Result<Self, RepositoryError> {
        let id = id.as_ref();

        if !Self::is_object_id(id) {
            return Err(RepositoryError::InvalidObjectId(id.to_string()));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Whether `candidate` has the shape of a full object ID
    pub fn is_object_id(candidate: &str) -> bool {
        candidate.len() == OBJECT_ID_LENGTH && candidate.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Path of the object file, relative to the objects directory
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    pub fn to_short_oid(&self) -> &str {
        &self.0[..SHORT_OID_LENGTH]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
