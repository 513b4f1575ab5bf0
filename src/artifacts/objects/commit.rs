//! Commit object
//!
//! Commits record a tree snapshot, at most one parent, who made them and
//! when, plus a message.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit\0tree <tree-id>
//! parent <parent-id>
//! author <user>
//! time <YYYY-MM-DD HH:MM:SS>
//!
//! <commit message>
//! ```
//!
//! The `parent` line is absent for the first commit. Lines of the message
//! starting with `#` are stripped before the commit is built.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use chrono::{NaiveDateTime, Timelike};

/// Layout of the `time` header
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const AUTHOR_NAME_VAR: &str = "TWIG_AUTHOR_NAME";
const FALLBACK_AUTHOR_VAR: &str = "USER";
const AUTHOR_DATE_VAR: &str = "TWIG_AUTHOR_DATE";

/// Commit author, recorded as a bare user name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    name: String,
}

impl Author {
    /// Create an author; line breaks would corrupt the header, so they are
    /// folded into spaces
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().replace(['\n', '\r'], " ");
        Author {
            name: name.trim().to_string(),
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads `TWIG_AUTHOR_NAME`, falling back to `USER`.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var(AUTHOR_NAME_VAR)
            .or_else(|_| std::env::var(FALLBACK_AUTHOR_VAR))
            .map_err(|_| {
                anyhow::anyhow!("neither {AUTHOR_NAME_VAR} nor {FALLBACK_AUTHOR_VAR} is set")
            })?;

        Ok(Author::new(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Commit timestamp from `TWIG_AUTHOR_DATE`, or the local time now
pub fn timestamp_from_env() -> anyhow::Result<NaiveDateTime> {
    match std::env::var(AUTHOR_DATE_VAR) {
        Ok(date) => NaiveDateTime::parse_from_str(&date, TIMESTAMP_FORMAT).map_err(|e| {
            anyhow::anyhow!("{AUTHOR_DATE_VAR} must look like 2024-01-31 12:00:00: {e}")
        }),
        Err(_) => {
            let now = chrono::Local::now().naive_local();
            Ok(now.with_nanosecond(0).unwrap_or(now))
        }
    }
}

/// Drop every line starting with `#` and any trailing blank lines
pub fn strip_comments(message: &str) -> String {
    message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    parent: Option<ObjectId>,
    author: Author,
    time: NaiveDateTime,
    message: String,
}

impl Commit {
    /// Create a new commit; the message is stored with comment lines removed
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        time: NaiveDateTime,
        message: &str,
    ) -> Self {
        Commit {
            tree_oid,
            parent,
            author,
            time,
            message: strip_comments(message),
        }
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl Packable for Commit {
    fn content(&self) -> Bytes {
        let mut object_content = format!("tree {}\n", self.tree_oid);
        if let Some(parent) = &self.parent {
            object_content.push_str(&format!("parent {parent}\n"));
        }
        object_content.push_str(&format!("author {}\n", self.author));
        object_content.push_str(&format!("time {}\n", self.time.format(TIMESTAMP_FORMAT)));
        object_content.push('\n');
        object_content.push_str(&self.message);

        Bytes::from(object_content)
    }
}

impl Unpackable for Commit {
    fn deserialize(oid: &ObjectId, content: Bytes) -> Result<Self> {
        let corrupt = |reason: &str| RepositoryError::CorruptObject {
            oid: oid.clone(),
            reason: reason.to_string(),
        };

        let content = String::from_utf8(content.to_vec())
            .map_err(|_| corrupt("commit content is not valid UTF-8"))?;
        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| corrupt("missing blank line before message"))?;

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut time = None;

        for line in headers.lines() {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| corrupt("malformed header line"))?;

            match key {
                "tree" => {
                    tree_oid =
                        Some(ObjectId::try_parse(value).map_err(|_| corrupt("invalid tree id"))?)
                }
                // only the first parent line counts
                "parent" if parent.is_none() => {
                    parent =
                        Some(ObjectId::try_parse(value).map_err(|_| corrupt("invalid parent id"))?)
                }
                "author" => author = Some(Author::new(value)),
                "time" => {
                    time = Some(
                        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                            .map_err(|_| corrupt("invalid time header"))?,
                    )
                }
                _ => {}
            }
        }

        Ok(Commit {
            tree_oid: tree_oid.ok_or_else(|| corrupt("missing tree line"))?,
            parent,
            author: author.ok_or_else(|| corrupt("missing author line"))?,
            time: time.ok_or_else(|| corrupt("missing time line"))?,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content()).into_owned()
    }
}
