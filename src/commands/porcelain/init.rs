use crate::areas::repository::Repository;
use crate::errors::{RepositoryError, Result};
use std::io::Write;

impl Repository {
    /// Create (or re-create) the metadata directory layout
    ///
    /// Existing objects, refs and index are left in place; only HEAD is
    /// reset to the default branch.
    pub fn init(&self, args: &[String]) -> Result<()> {
        if !args.is_empty() {
            return Err(RepositoryError::UsageError(self.config().system_name.clone()));
        }

        let existed = self.is_initialized();

        self.fs().create_dir_all(self.database().objects_path())?;
        self.fs().create_dir_all(&self.refs().heads_path())?;
        self.refs().set_head(&self.config().default_branch)?;

        tracing::info!(path = %self.metadata_path().display(), existed, "repository initialized");

        let action = if existed {
            "Reinitialized existing"
        } else {
            "Initialized empty"
        };
        writeln!(
            self.writer(),
            "{action} {} repository in {}/",
            self.config().display_name(),
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
