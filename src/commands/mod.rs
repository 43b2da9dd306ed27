//! Command implementations
//!
//! Operations are `impl Repository` blocks grouped under `porcelain`,
//! composing the areas and artifacts into the public workflow.

pub mod porcelain;
