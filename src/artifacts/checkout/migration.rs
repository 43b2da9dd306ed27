use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::{EntryMetadata, IndexEntry};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use crate::errors::Result;

/// Working tree and index update from the current state to a target commit
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Target tree entries paired with their loaded blobs
    targets: Vec<(TreeEntry, Blob)>,
}

impl<'r> Migration<'r> {
    /// Load the target commit's tree and every blob it references
    pub fn plan(repository: &'r Repository, commit_oid: &ObjectId) -> Result<Self> {
        let database = repository.database();
        let commit = database.parse_object_as_commit(commit_oid)?;
        let tree = database.parse_object_as_tree(commit.tree_oid())?;

        let targets = tree
            .into_entries()
            .into_iter()
            .map(|entry| {
                let blob = database.parse_object_as_blob(&entry.oid)?;
                Ok((entry, blob))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Migration {
            repository,
            targets,
        })
    }

    pub fn targets(&self) -> impl Iterator<Item = &TreeEntry> {
        self.targets.iter().map(|(entry, _)| entry)
    }

    pub fn apply_changes(&self, index: &mut Index) -> Result<()> {
        self.update_workspace(index)?;
        self.update_index(index)?;

        Ok(())
    }

    fn update_workspace(&self, index: &Index) -> Result<()> {
        let workspace = self.repository.workspace();

        let tracked = workspace
            .list_files()?
            .into_iter()
            .filter(|path| index.entry_by_path(path).is_some())
            .collect::<Vec<_>>();
        for path in &tracked {
            workspace.remove_file(path)?;
        }
        tracing::debug!(removed = tracked.len(), "tracked files removed");

        for (entry, blob) in &self.targets {
            workspace.write_file(&entry.path, blob.content(), entry.mode)?;
        }
        tracing::debug!(written = self.targets.len(), "target files written");

        Ok(())
    }

    /// Stats are zeroed; the next `add` refreshes them
    fn update_index(&self, index: &mut Index) -> Result<()> {
        let entries = self
            .targets()
            .map(|entry| {
                IndexEntry::new(
                    entry.path.clone(),
                    entry.oid.clone(),
                    EntryMetadata::zeroed(entry.mode),
                )
            })
            .collect();

        index.replace_all(entries);
        index.write_updates()
    }
}
