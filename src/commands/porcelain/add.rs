use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::{EntryMetadata, IndexEntry};
use crate::artifacts::objects::blob::Blob;
use crate::errors::{RepositoryError, Result};

/// Arguments that select every file in the working tree
const SELECT_ALL: [&str; 3] = [".", "./", "*"];

impl Repository {
    /// Stage files
    ///
    /// Every named path is checked before anything is written, so a
    /// missing path leaves the object store and index untouched.
    pub fn add(&self, paths: &[String]) -> Result<()> {
        self.ensure_initialized()?;

        let paths = paths
            .iter()
            .map(String::as_str)
            .filter(|path| !path.trim().is_empty())
            .collect::<Vec<_>>();
        if paths.is_empty() {
            return Err(RepositoryError::NothingSpecifiedNothingAdded);
        }

        let files = if paths.iter().any(|path| SELECT_ALL.contains(path)) {
            self.workspace().list_files()?
        } else {
            self.expand_paths(&paths)?
        };

        let mut index = self.index();
        index.rehydrate()?;

        let pruned = index.prune(|entry| self.workspace().exists(&entry.path));
        if !pruned.is_empty() {
            tracing::debug!(?pruned, "dropped entries for vanished files");
        }

        for path in &files {
            self.stage_file(&mut index, path)?;
        }

        index.write_updates()
    }

    /// Resolve literal paths to the files they name, directories expanded
    fn expand_paths(&self, paths: &[&str]) -> Result<Vec<String>> {
        let workspace = self.workspace();
        let mut files = Vec::new();

        for path in paths {
            let normalized = workspace
                .normalize(path)
                .filter(|normalized| normalized.is_empty() || workspace.exists(normalized))
                .ok_or_else(|| RepositoryError::PathspecMismatch(path.to_string()))?;

            if self.is_excluded(&normalized) {
                tracing::debug!(path = %normalized, "skipping path inside an excluded directory");
            } else if normalized.is_empty() || workspace.is_dir(&normalized) {
                files.extend(workspace.list_files_under(&workspace.path().join(&normalized))?);
            } else {
                files.push(normalized);
            }
        }

        let mut seen = std::collections::HashSet::new();
        files.retain(|file| seen.insert(file.clone()));

        Ok(files)
    }

    fn is_excluded(&self, path: &str) -> bool {
        path.split('/')
            .any(|part| self.workspace().excluded().iter().any(|name| name == part))
    }

    fn stage_file(&self, index: &mut Index, path: &str) -> Result<()> {
        let data = self.workspace().read_file(path)?;
        let stat = self.workspace().stat_file(path)?;

        let oid = self.database().store(&Blob::new(data))?;
        let metadata = EntryMetadata::from(stat);

        if index
            .entry_by_path(path)
            .is_some_and(|entry| entry.stat_match(&oid, &metadata))
        {
            return Ok(());
        }

        index.add(IndexEntry::new(path.to_string(), oid, metadata));

        Ok(())
    }
}
