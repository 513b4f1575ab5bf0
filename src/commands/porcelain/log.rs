use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{RepositoryError, Result};

impl Repository {
    /// History from `start` (an ID, branch or tag) or from HEAD, newest first
    ///
    /// A start that does not name a commit fails with `UnknownRevision`. A
    /// repository without commits yields an empty walk.
    pub fn log(&self, start: Option<&str>) -> Result<RevList<'_>> {
        let start_oid = match start {
            Some(token) => {
                let revision = Revision::resolve(token, self)?;

                match self.database().get_object(revision.oid(), None)? {
                    (ObjectType::Commit, _) => Some(revision.oid().clone()),
                    _ => return Err(RepositoryError::UnknownRevision(token.to_string())),
                }
            }
            None => self.refs().resolve_head()?,
        };

        Ok(RevList::new(self.database(), start_oid))
    }
}
