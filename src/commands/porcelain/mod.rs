//! User-facing repository operations
//!
//! Each file adds one operation to [`Repository`](crate::areas::repository::Repository):
//!
//! - `init`: create or reinitialize the metadata directory
//! - `add`: stage files
//! - `commit`: record the staged snapshot
//! - `status`: compare head, index and working tree
//! - `log`: walk the current branch's history
//! - `branch`: list, create or delete branches
//! - `switch`: check out another branch
//! - `clone`: copy a repository to a new location

pub mod add;
pub mod branch;
pub mod clone;
pub mod commit;
pub mod init;
pub mod log;
pub mod status;
pub mod switch;
