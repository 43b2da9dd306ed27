//! A miniature version-control engine
//!
//! Content-addressed object store, binary staging area, flat tree and
//! commit codecs, rename-aware change summaries, and a branch/HEAD state
//! machine, composed by [`areas::repository::Repository`].

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
