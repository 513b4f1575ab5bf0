/// Kind of a stored object
///
/// Variant order matches the lexical order of the on-disk names, so the
/// derived `Ord` agrees with sorting by `as_str()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectType {
    Blob,
    Commit,
    Tree,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Split a raw object file into its type and payload
    ///
    /// The header is everything before the first NUL byte.
    pub fn split_header(raw: &[u8]) -> Option<(ObjectType, usize)> {
        let nul = raw.iter().position(|byte| *byte == b'\0')?;
        let name = std::str::from_utf8(&raw[..nul]).ok()?;

        ObjectType::try_from(name)
            .ok()
            .map(|object_type| (object_type, nul + 1))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            other => Err(format!("invalid object type '{other}'")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
