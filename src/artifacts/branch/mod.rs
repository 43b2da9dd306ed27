pub mod branch_name;

/// Names that could escape `refs/heads` or collide with ref syntax
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|/\.|\.\.|^/|/$|//|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
