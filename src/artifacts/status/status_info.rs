use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::object_id::ObjectId;

/// Where HEAD stands and whether the working tree matches it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    Detached(ObjectId),
    OnBranch { branch: RefName, clean: bool },
}

impl std::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusReport::Detached(oid) => write!(f, "HEAD detached at {oid}"),
            StatusReport::OnBranch { branch, clean } => {
                writeln!(f, "On branch {branch}")?;
                if *clean {
                    write!(f, "nothing to commit, working tree clean")
                } else {
                    write!(f, "changes not yet committed")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_report_names_the_commit() {
        let oid = ObjectId::try_parse("ab".repeat(32)).unwrap();

        assert_eq!(
            StatusReport::Detached(oid.clone()).to_string(),
            format!("HEAD detached at {oid}")
        );
    }

    #[test]
    fn branch_report_mentions_cleanliness() {
        let branch = RefName::try_parse("main").unwrap();
        let clean = StatusReport::OnBranch {
            branch: branch.clone(),
            clean: true,
        };
        let dirty = StatusReport::OnBranch {
            branch,
            clean: false,
        };

        assert!(clean.to_string().ends_with("working tree clean"));
        assert!(dirty.to_string().starts_with("On branch main\n"));
        assert!(dirty.to_string().ends_with("changes not yet committed"));
    }
}
