use crate::areas::database::Database;
use crate::areas::filesystem::FileSystem;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::RepositoryConfig;
use crate::errors::{RepositoryError, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Repository rooted at a working directory
///
/// Every public operation lives in `commands::porcelain` as an `impl
/// Repository` block. User-facing output goes to `writer`.
pub struct Repository {
    path: Box<Path>,
    config: RepositoryConfig,
    fs: Arc<dyn FileSystem>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(
        path: &Path,
        config: RepositoryConfig,
        fs: Arc<dyn FileSystem>,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        let metadata_path = path.join(&config.repository_dir_name);

        let index = Index::new(
            metadata_path.join("index").into_boxed_path(),
            fs.clone(),
            config.hash_algorithm,
        );
        let database = Database::new(
            metadata_path.join("objects").into_boxed_path(),
            fs.clone(),
            config.hash_algorithm,
        );
        let workspace = Workspace::new(path.into(), fs.clone(), config.excluded_names());
        let refs = Refs::new(
            metadata_path.into_boxed_path(),
            fs.clone(),
            config.hash_algorithm,
            config.default_branch.clone(),
        );

        Repository {
            path: path.into(),
            config,
            fs,
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(&self.config.repository_dir_name)
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The metadata directory's presence is what makes this a repository
    pub fn is_initialized(&self) -> bool {
        self.fs.exists(&self.metadata_path())
    }

    pub(crate) fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::NotARepository {
                system_name: self.config.system_name.clone(),
                dir_name: self.config.repository_dir_name.clone(),
            })
        }
    }
}
