//! Branch switching
//!
//! Replaces the tracked part of the working tree and the whole index with
//! the snapshot of a target commit. Every blob is loaded before any file
//! is touched.

pub mod migration;
