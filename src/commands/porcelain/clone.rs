use crate::areas::repository::Repository;
use crate::errors::{RepositoryError, Result};
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Copy a repository's metadata and working files to a new location
    ///
    /// Both paths resolve against this repository's root. The object graph
    /// is copied as stored, without re-validation.
    pub fn clone_repository(&self, args: &[String]) -> Result<()> {
        let [source, destination] = args else {
            return Err(RepositoryError::NotSupportedCommand(args.join(" ")));
        };

        let source_root = self.path().join(source);
        let destination_root = self.path().join(destination);
        let dir_name = &self.config().repository_dir_name;

        let source_metadata = source_root.join(dir_name);
        if !self.fs().is_dir(&source_metadata) {
            return Err(RepositoryError::RepositoryNotFound(source_root));
        }

        writeln!(self.writer(), "Cloning into '{destination}'...")?;

        let metadata_files =
            self.copy_tree(&source_metadata, &destination_root.join(dir_name), &[])?;
        let working_files = self.copy_tree(
            &source_root,
            &destination_root,
            &self.config().excluded_names(),
        )?;

        tracing::info!(
            source = %source_root.display(),
            destination = %destination_root.display(),
            metadata_files,
            working_files,
            "repository cloned"
        );

        Ok(())
    }

    /// Copy every file below `from` to the same relative path below `to`
    fn copy_tree(&self, from: &Path, to: &Path, excluded: &[String]) -> Result<usize> {
        let fs = self.fs();
        fs.create_dir_all(to)?;

        let files = fs.walk_files(from, excluded)?;
        for file in &files {
            let Ok(relative) = file.strip_prefix(from) else {
                continue;
            };
            let target = to.join(relative);

            if let Some(parent) = target.parent() {
                fs.create_dir_all(parent)?;
            }
            fs.write(&target, &fs.read(file)?)?;

            if (fs.stat(file)?.mode & 0o111) != 0 {
                fs.set_executable(&target, true)?;
            }
            tracing::debug!(file = %relative.display(), "copied");
        }

        Ok(files.len())
    }
}
