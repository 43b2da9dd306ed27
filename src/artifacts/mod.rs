//! Data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `checkout`: Working tree migration for branch switches
//! - `commit`: Change summaries reported after committing
//! - `core`: Configuration and hash algorithms
//! - `diff`: Line diffs, similarity and rename detection
//! - `index`: Index file entries, header and checksum
//! - `log`: Commit history traversal and display
//! - `objects`: Object types (blob, tree, commit)
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod commit;
pub mod core;
pub mod diff;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
