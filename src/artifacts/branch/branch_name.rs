use crate::artifacts::branch::INVALID_REF_NAME_REGEX;
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::DEFAULT_BRANCH;
use crate::errors::RepositoryError;

/// Validated name of a branch or tag
///
/// Names may be hierarchical (`feature/login`), but must not look like a
/// full object ID: HEAD stores either a branch name or an ID, and the two
/// have to stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self, RepositoryError> {
        let name = name.into();
        let invalid = |reason: &str| RepositoryError::InvalidRefName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .map_err(|_| invalid("name validation pattern failed to compile"))?;

        if re.is_match(&name) {
            return Err(invalid("contains a forbidden character sequence"));
        }

        if ObjectId::is_object_id(&name) {
            return Err(invalid("name is indistinguishable from an object id"));
        }

        Ok(Self(name))
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
