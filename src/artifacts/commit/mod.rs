//! Commit change summaries
//!
//! - `summary`: what a new commit changed relative to its parent, and the
//!   report printed after committing

pub mod summary;
