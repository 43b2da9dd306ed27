//! Commit history traversal
//!
//! - `rev_list`: Walks the first-parent chain from a starting commit
//! - `log_entry`: One decorated commit as shown by `log`

pub mod log_entry;
pub mod rev_list;
