pub mod branch_name;
pub mod revision;

/// Sequences a ref name may not contain (same rules for branches and tags)
pub const INVALID_REF_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
