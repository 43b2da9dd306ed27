//! Working tree status inspection
//!
//! Compares three snapshots of the repository: the head commit's tree, the
//! index, and the working directory.
//!
//! ## Components
//!
//! - `inspector`: Loads the snapshots and classifies every path
//! - `status_report`: The five change buckets and their display

pub mod inspector;
pub mod status_report;
