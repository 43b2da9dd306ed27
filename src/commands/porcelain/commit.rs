use crate::areas::repository::Repository;
use crate::artifacts::commit::summary::ChangeSummary;
use crate::artifacts::diff::rename::FileSnapshot;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{RepositoryError, Result, nothing_to_commit_message};
use std::io::Write;

/// Result of a `commit` that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created { oid: ObjectId, summary: ChangeSummary },
    /// Staged snapshot equals the parent's; nothing was recorded
    Unchanged,
}

impl Repository {
    pub fn commit(&self, message: &str) -> Result<CommitOutcome> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(RepositoryError::NotSupportedCommand(message.to_string()));
        }
        let message = message.trim();

        let state = self.refs().head_state()?;
        let branch = state
            .branch()
            .map(str::to_string)
            .unwrap_or_else(|| self.config().default_branch.clone());
        let parent = state.oid().cloned();

        let mut index = self.index();
        index.rehydrate()?;
        if index.is_empty() {
            return Err(RepositoryError::NothingToCommit {
                branch,
                is_root: parent.is_none(),
            });
        }

        let tree = Tree::build(index.entries());
        drop(index);
        let tree_oid = self.database().store(&tree)?;

        let (parent_tree_oid, parent_entries) = match &parent {
            Some(parent) => self.parent_snapshot(parent)?,
            None => (None, Vec::new()),
        };

        if parent_tree_oid.as_ref() == Some(&tree_oid) {
            tracing::info!(%branch, "staged snapshot matches parent, no commit written");
            writeln!(self.writer(), "{}", nothing_to_commit_message(&branch, false))?;
            return Ok(CommitOutcome::Unchanged);
        }

        let author = self.author();
        let commit = Commit::new(parent.clone(), tree_oid, author, message.to_string());
        let oid = self.database().store(&commit)?;
        self.refs().update_branch(&branch, &oid)?;

        tracing::info!(%oid, %branch, "commit recorded");

        let staged = self.snapshots(tree.entries())?;
        let summary = match parent {
            Some(_) => ChangeSummary::between(self.snapshots(&parent_entries)?, staged),
            None => ChangeSummary::root(staged),
        };

        write!(
            self.writer(),
            "{}",
            summary.render(&branch, parent.is_none(), &oid, message)
        )?;

        Ok(CommitOutcome::Created { oid, summary })
    }

    fn author(&self) -> Author {
        let config = self.config();
        match config.author_date {
            Some(date) => Author::new_with_timestamp(
                config.author_name.clone(),
                config.author_email.clone(),
                date,
            ),
            None => Author::new(config.author_name.clone(), config.author_email.clone()),
        }
    }

    /// Tree hash and entries of the parent commit
    ///
    /// A parent missing from the store reads as an empty snapshot.
    fn parent_snapshot(&self, parent: &ObjectId) -> Result<(Option<ObjectId>, Vec<TreeEntry>)> {
        let database = self.database();
        let snapshot = database.parse_object_as_commit(parent).and_then(|commit| {
            let tree = database.parse_object_as_tree(commit.tree_oid())?;
            Ok((Some(commit.tree_oid().clone()), tree.into_entries()))
        });

        match snapshot {
            Err(RepositoryError::ObjectNotFound(oid)) => {
                tracing::warn!(%oid, "parent snapshot missing from object store");
                Ok((None, Vec::new()))
            }
            snapshot => snapshot,
        }
    }

    /// Pair entries with their stored text; a missing blob reads as empty
    fn snapshots(&self, entries: &[TreeEntry]) -> Result<Vec<FileSnapshot>> {
        entries
            .iter()
            .map(|entry| {
                let text = match self.database().parse_object_as_blob(&entry.oid) {
                    Ok(blob) => blob.text(),
                    Err(RepositoryError::ObjectNotFound(_)) => String::new(),
                    Err(err) => return Err(err),
                };
                Ok(FileSnapshot::new(
                    entry.path.clone(),
                    entry.oid.clone(),
                    entry.mode,
                    text,
                ))
            })
            .collect()
    }
}
