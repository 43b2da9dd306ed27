use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::{RepositoryError, Result};
use std::io::Write;

impl Repository {
    /// Check out another branch, replacing tracked files with its snapshot
    ///
    /// The target ref, commit, tree and every blob are loaded before the
    /// working tree or index is touched.
    pub fn switch(&self, args: &[String]) -> Result<()> {
        self.ensure_initialized()?;

        let [name] = args else {
            return Err(RepositoryError::NotSupportedCommand(args.join(" ")));
        };
        if name.trim().is_empty() {
            return Err(RepositoryError::MissingBranchOrCommitArgument);
        }

        let target = self.refs().switch_target(name)?;
        let migration = Migration::plan(self, &target)?;

        let mut index = self.index();
        index.rehydrate()?;
        migration.apply_changes(&mut index)?;
        drop(index);

        self.refs().set_head(name)?;

        tracing::info!(branch = %name, commit = %target, "switched branch");
        writeln!(self.writer(), "Switched to branch '{name}'")?;

        Ok(())
    }
}
