use crate::areas::repository::Repository;
use crate::errors::{RepositoryError, Result};
use std::io::Write;

const DELETE_FLAG: &str = "-d";

impl Repository {
    /// List, create or delete branches depending on the arguments
    ///
    /// - no arguments: list branches, the current one starred
    /// - `<name>`: create a branch at the current commit
    /// - `-d <name>`: delete a branch other than the current one
    ///
    /// More than two arguments are ignored.
    pub fn branch(&self, args: &[String]) -> Result<()> {
        self.ensure_initialized()?;

        match args {
            [] => self.list_branches(),
            [flag] if flag == DELETE_FLAG => Err(RepositoryError::BranchNameRequired),
            [name] => self.create_branch(name),
            [flag, name] if flag == DELETE_FLAG => self.delete_branch(name),
            [other, _] => Err(RepositoryError::NotValidObjectName(other.clone())),
            _ => {
                tracing::debug!(?args, "too many branch arguments, nothing done");
                Ok(())
            }
        }
    }

    fn list_branches(&self) -> Result<()> {
        let current = self.refs().current_branch_name()?;

        for name in self.refs().list_branches()? {
            let marker = if name == current { "*" } else { " " };
            writeln!(self.writer(), "{marker} {name}")?;
        }

        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let oid = self.refs().create_branch(name)?;

        tracing::info!(branch = name, %oid, "branch created");
        writeln!(
            self.writer(),
            "Branch '{name}' created at {}...",
            oid.to_short_oid()
        )?;

        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        if !self.refs().branch_exists(name)? {
            return Err(RepositoryError::BranchNotFound(name.to_string()));
        }
        if self.refs().is_current_branch(name)? {
            return Err(RepositoryError::CannotDeleteCheckedOutBranch {
                name: name.to_string(),
                root: self.path().to_path_buf(),
            });
        }

        self.refs().delete_branch(name)?;

        tracing::info!(branch = name, "branch deleted");
        writeln!(self.writer(), "Deleted branch '{name}'")?;

        Ok(())
    }
}
