use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use crate::artifacts::status::status_report::StatusReport;
use crate::errors::{RepositoryError, Result};
use derive_new::new;
use std::collections::HashMap;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Entries of the head commit's tree, empty before the first commit
    ///
    /// A head commit or tree missing from the object store also reads as
    /// empty.
    pub fn head_tree(&self) -> Result<Vec<TreeEntry>> {
        let Some(head) = self.repository.refs().head_commit_hash()? else {
            return Ok(Vec::new());
        };

        let database = self.repository.database();
        let tree = database
            .parse_object_as_commit(&head)
            .and_then(|commit| database.parse_object_as_tree(commit.tree_oid()));

        match tree {
            Ok(tree) => Ok(tree.into_entries()),
            Err(RepositoryError::ObjectNotFound(oid)) => {
                tracing::warn!(%oid, "head snapshot missing from object store");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Blob hash of a working file's current content
    pub fn working_oid(&self, path: &str) -> Result<ObjectId> {
        let blob = Blob::new(self.repository.workspace().read_file(path)?);
        blob.object_id(self.repository.config().hash_algorithm)
    }

    pub fn inspect(&self, index: &Index) -> Result<StatusReport> {
        let state = self.repository.refs().head_state()?;
        let head_tree = self.head_tree()?;
        let head_oids = head_tree
            .iter()
            .map(|entry| (entry.path.as_str(), &entry.oid))
            .collect::<HashMap<_, _>>();

        let mut report = StatusReport {
            branch: state.branch().unwrap_or_default().to_string(),
            is_root: state.oid().is_none(),
            ..Default::default()
        };

        for entry in index.entries() {
            match head_oids.get(entry.path.as_str()) {
                None => report.staged_added.push(entry.path.clone()),
                Some(oid) if **oid != entry.oid => report.staged_modified.push(entry.path.clone()),
                Some(_) => {}
            }
        }

        report.staged_deleted = head_tree
            .iter()
            .filter(|entry| index.entry_by_path(&entry.path).is_none())
            .map(|entry| entry.path.clone())
            .collect();

        for path in self.repository.workspace().list_files()? {
            match index.entry_by_path(&path) {
                None => report.untracked.push(path),
                Some(entry) if self.working_oid(&path)? != entry.oid => {
                    report.unstaged_modified.push(path)
                }
                Some(_) => {}
            }
        }

        Ok(report)
    }
}
