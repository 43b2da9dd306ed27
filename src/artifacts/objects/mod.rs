//! Stored object types
//!
//! Everything the object store persists is one of three kinds:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: flat list of `(mode, path, hash)` for every staged file
//! - **Commit**: tree pointer, optional parent, author and message
//!
//! Objects are hashed and stored framed as `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;
