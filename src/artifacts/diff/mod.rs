//! Content diffing and rename detection
//!
//! - `line_diff`: line-level insertion/deletion counts and similarity scores
//! - `rename`: greedy pairing of deleted and created files
//!
//! Both work on whole file texts; trees are flat so no tree walk is needed.

pub mod line_diff;
pub mod rename;
