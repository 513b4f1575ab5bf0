use crate::areas::refs::{Head, RefNamespace};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::errors::{InvalidState, Result};

impl Repository {
    /// Create a branch at HEAD's commit and attach HEAD to it
    ///
    /// Without any commit yet, HEAD is attached to the new, unborn branch and
    /// no ref file is written. An existing branch of that name is an error
    /// and leaves every ref untouched.
    pub fn branch_out(&self, name: &str) -> Result<RefName> {
        let name = RefName::try_parse(name)?;

        if self.refs().ref_exists(RefNamespace::Heads, &name) {
            return Err(InvalidState::BranchExists(name.to_string()).into());
        }

        if let Some(head_oid) = self.refs().resolve_head()? {
            self.refs()
                .create_ref(RefNamespace::Heads, &name, &head_oid)?;
        }

        self.refs().set_head(&Head::Attached(name.clone()))?;
        tracing::info!(branch = %name, "switched to new branch");

        Ok(name)
    }

    pub fn list_branches(&self) -> Result<Vec<RefName>> {
        self.refs().list_refs(RefNamespace::Heads)
    }

    /// Branch HEAD is attached to, if any
    pub fn current_branch(&self) -> Result<Option<RefName>> {
        Ok(match self.refs().read_head()? {
            Head::Attached(branch) => Some(branch),
            Head::Unset | Head::Detached(_) => None,
        })
    }
}
