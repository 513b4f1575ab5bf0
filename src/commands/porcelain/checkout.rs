use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// HEAD is attached to the branch
    Branch { name: RefName, oid: ObjectId },
    /// HEAD holds the commit ID (checked out by ID or by tag)
    Detached { oid: ObjectId },
}

impl Repository {
    /// Switch the working tree and HEAD to a commit, branch or tag
    ///
    /// The working tree is overwritten unconditionally: uncommitted changes
    /// to tracked or untracked files are lost. Nothing is touched when the
    /// token does not resolve to a commit.
    pub fn checkout(&self, token: &str) -> Result<CheckoutOutcome> {
        let revision = Revision::resolve(token, self)?;
        let commit = self.database().parse_object_as_commit(revision.oid())?;

        self.restore_tree(commit.tree_oid())?;

        let outcome = match revision {
            Revision::Branch { name, oid } => {
                self.refs().set_head(&Head::Attached(name.clone()))?;
                CheckoutOutcome::Branch { name, oid }
            }
            Revision::Object(oid) | Revision::Tag { oid, .. } => {
                self.refs().set_head(&Head::Detached(oid.clone()))?;
                CheckoutOutcome::Detached { oid }
            }
        };

        tracing::info!(token, ?outcome, "checked out");

        Ok(outcome)
    }
}
