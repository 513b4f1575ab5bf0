use crate::areas::refs::RefNamespace;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};

/// What a user-supplied revision token names
///
/// Tokens are tried in a fixed order and the first match wins:
///
/// 1. a full object ID present in the object store
/// 2. a branch under `refs/heads`
/// 3. a tag under `refs/tags`
///
/// The resolved object is not yet known to be a commit; callers that need
/// one check the type before acting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Object(ObjectId),
    Branch { name: RefName, oid: ObjectId },
    Tag { name: RefName, oid: ObjectId },
}

impl Revision {
    pub fn resolve(token: &str, repository: &Repository) -> Result<Self> {
        let unknown = || RepositoryError::UnknownRevision(token.to_string());

        if ObjectId::is_object_id(token) {
            let oid = ObjectId::try_parse(token)?;

            return if repository.database().contains(&oid) {
                Ok(Revision::Object(oid))
            } else {
                Err(unknown())
            };
        }

        // anything that is not a valid ref name cannot name a ref either
        let Ok(name) = RefName::try_parse(token) else {
            return Err(unknown());
        };

        if let Some(oid) = repository.refs().read_ref(RefNamespace::Heads, &name)? {
            return Ok(Revision::Branch { name, oid });
        }

        if let Some(oid) = repository.refs().read_ref(RefNamespace::Tags, &name)? {
            return Ok(Revision::Tag { name, oid });
        }

        Err(unknown())
    }

    pub fn oid(&self) -> &ObjectId {
        match self {
            Revision::Object(oid) | Revision::Branch { oid, .. } | Revision::Tag { oid, .. } => oid,
        }
    }
}
