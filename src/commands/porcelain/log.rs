use crate::areas::refs::HeadState;
use crate::areas::repository::Repository;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::log::rev_list::RevList;
use crate::errors::{RepositoryError, Result};
use std::io::Write;

impl Repository {
    /// Walk the current branch's history newest first, printing each commit
    pub fn log(&self) -> Result<Vec<LogEntry>> {
        self.ensure_initialized()?;

        let (branch, head) = match self.refs().head_state()? {
            HeadState::Attached { branch, oid } => (branch, oid),
            HeadState::Root { branch } => return Err(RepositoryError::NoCommitsYet(branch)),
            HeadState::NoRepository => {
                return Err(RepositoryError::NoCommitsYet(
                    self.config().default_branch.clone(),
                ));
            }
        };

        let reverse_refs = self.refs().reverse_refs()?;
        let mut entries = Vec::new();

        for item in RevList::new(self.database(), Some(head)) {
            let (oid, commit) = item?;
            let branches = reverse_refs.get(&oid).cloned().unwrap_or_default();
            let head_branch = entries.is_empty().then(|| branch.clone());

            let entry = LogEntry {
                oid,
                commit,
                head_branch,
                branches,
            };
            write!(self.writer(), "{}", entry.render())?;
            entries.push(entry);
        }

        Ok(entries)
    }
}
