use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use derive_new::new;

/// Parent-chain walk, newest first
///
/// The walk ends quietly at the first commit that cannot be loaded, either
/// missing from the object store or not decodable as a commit.
#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevList<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(err @ (RepositoryError::ObjectNotFound(_) | RepositoryError::CorruptObject(_))) => {
                tracing::debug!(oid = %commit_oid, %err, "history truncated at unloadable commit");
                None
            }
            Err(err) => Some(Err(err)),
        }
    }
}
