//! Core repository components
//!
//! This module contains the stateful building blocks of a repository:
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `filesystem`: Filesystem capability injected into every component
//! - `index`: Staging area for tracking file changes
//! - `refs`: HEAD and branch references
//! - `repository`: Repository state and component accessors
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod filesystem;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
