use crate::areas::refs::RefNamespace;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{InvalidState, Result};

impl Repository {
    /// Point a new tag at HEAD's commit
    ///
    /// Tags never move: an existing tag of that name is an error.
    pub fn create_tag(&self, name: &str) -> Result<(RefName, ObjectId)> {
        let name = RefName::try_parse(name)?;

        if self.refs().ref_exists(RefNamespace::Tags, &name) {
            return Err(InvalidState::TagExists(name.to_string()).into());
        }

        let head_oid = self
            .refs()
            .resolve_head()?
            .ok_or(InvalidState::NoCommits)?;

        self.refs().create_ref(RefNamespace::Tags, &name, &head_oid)?;
        tracing::info!(tag = %name, oid = %head_oid, "created tag");

        Ok((name, head_oid))
    }

    pub fn list_tags(&self) -> Result<Vec<RefName>> {
        self.refs().list_refs(RefNamespace::Tags)
    }
}
