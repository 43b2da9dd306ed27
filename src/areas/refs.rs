//! References (HEAD and branches)
//!
//! HEAD is always symbolic: it names the checked-out branch and never holds
//! a raw hash. Branch refs live under `refs/heads/` and hold a commit hash.
//! Every name is checked with [`BranchName`] before it becomes a path.
//!
//! ## File Format
//!
//! - `HEAD`: `ref: refs/heads/<name>\n`
//! - `refs/heads/<name>`: `<hex-hash>\n`

use crate::areas::filesystem::FileSystem;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

static SYMREF_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^ref: refs/heads/(.+)$").ok());

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Where HEAD currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    /// No metadata directory
    NoRepository,
    /// HEAD names a branch that has no valid commit hash yet
    Root { branch: String },
    /// HEAD names a branch holding a commit hash
    Attached { branch: String, oid: ObjectId },
}

impl HeadState {
    pub fn branch(&self) -> Option<&str> {
        match self {
            HeadState::NoRepository => None,
            HeadState::Root { branch } | HeadState::Attached { branch, .. } => Some(branch),
        }
    }

    pub fn oid(&self) -> Option<&ObjectId> {
        match self {
            HeadState::Attached { oid, .. } => Some(oid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Refs {
    /// Path to the metadata directory
    path: Box<Path>,
    fs: Arc<dyn FileSystem>,
    algorithm: HashAlgorithm,
    /// Branch assumed when HEAD has not been written yet
    default_branch: String,
}

impl Refs {
    pub fn new(
        path: Box<Path>,
        fs: Arc<dyn FileSystem>,
        algorithm: HashAlgorithm,
        default_branch: String,
    ) -> Self {
        Refs {
            path,
            fs,
            algorithm,
            default_branch,
        }
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    pub fn head_state(&self) -> Result<HeadState> {
        if !self.fs.exists(&self.path) {
            return Ok(HeadState::NoRepository);
        }

        let branch = self.current_branch_name()?;
        Ok(match self.resolve_branch(&branch)? {
            Some(oid) => HeadState::Attached { branch, oid },
            None => HeadState::Root { branch },
        })
    }

    /// Branch HEAD points at, or the default branch when HEAD is missing
    pub fn current_branch_name(&self) -> Result<String> {
        let head_path = self.head_path();
        if !self.fs.exists(&head_path) {
            return Ok(self.default_branch.clone());
        }

        let content = String::from_utf8_lossy(&self.fs.read(&head_path)?).into_owned();
        let content = content.trim();

        SYMREF_REGEX
            .as_ref()
            .and_then(|regex| regex.captures(content))
            .map(|captures| captures[1].to_string())
            .ok_or_else(|| RepositoryError::CorruptObject(format!("HEAD is not symbolic: '{content}'")))
    }

    /// Commit hash of the checked-out branch, `None` before the first commit
    pub fn head_commit_hash(&self) -> Result<Option<ObjectId>> {
        Ok(self.head_state()?.oid().cloned())
    }

    pub fn is_current_branch(&self, name: &str) -> Result<bool> {
        Ok(self.current_branch_name()? == name)
    }

    /// Whether `name` is one of the listed branches
    pub fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.list_branches()?.iter().any(|branch| branch == name))
    }

    /// Trimmed content of a branch ref, `None` when the ref is absent or
    /// its name is not a valid branch name
    pub fn read_branch(&self, name: &str) -> Result<Option<String>> {
        let Ok(name) = BranchName::try_parse(name) else {
            return Ok(None);
        };
        let branch_path = self.branch_path(&name);
        if !self.fs.exists(&branch_path) {
            return Ok(None);
        }

        let content = self.fs.read(&branch_path)?;
        Ok(Some(String::from_utf8_lossy(&content).trim().to_string()))
    }

    /// Commit hash a branch holds, `None` when absent or malformed
    pub fn resolve_branch(&self, name: &str) -> Result<Option<ObjectId>> {
        Ok(self
            .read_branch(name)?
            .and_then(|content| ObjectId::try_parse(content, self.algorithm).ok()))
    }

    /// Commit hash a branch must hold to be checked out
    pub fn switch_target(&self, name: &str) -> Result<ObjectId> {
        let content = self
            .read_branch(name)?
            .ok_or_else(|| RepositoryError::PathspecMismatch(name.to_string()))?;

        ObjectId::try_parse(content, self.algorithm).map_err(|_| RepositoryError::BrokenBranchHead)
    }

    /// Branch names under `refs/heads`, sorted
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let heads_path = self.heads_path();
        if !self.fs.exists(&heads_path) {
            return Ok(Vec::new());
        }

        let mut branches = self
            .fs
            .walk_files(&heads_path, &[])?
            .iter()
            .filter_map(|path| path.strip_prefix(&heads_path).ok())
            .map(|relative| {
                relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    /// Commit hash → branch names pointing at it; malformed refs are skipped
    pub fn reverse_refs(&self) -> Result<BTreeMap<ObjectId, Vec<String>>> {
        let mut reverse_refs: BTreeMap<ObjectId, Vec<String>> = BTreeMap::new();

        for branch in self.list_branches()? {
            if let Some(oid) = self.resolve_branch(&branch)? {
                reverse_refs.entry(oid).or_default().push(branch);
            }
        }

        Ok(reverse_refs)
    }

    /// Point a new branch at the current head commit
    pub fn create_branch(&self, name: &str) -> Result<ObjectId> {
        let name = BranchName::try_parse(name)?;
        if self.branch_exists(name.as_ref())? {
            return Err(RepositoryError::BranchAlreadyExists(name.to_string()));
        }

        match self.head_state()? {
            HeadState::Attached { oid, .. } => {
                self.write_branch(&name, &oid)?;
                Ok(oid)
            }
            HeadState::Root { branch } => Err(RepositoryError::NotValidObjectName(branch)),
            HeadState::NoRepository => Err(RepositoryError::NotValidObjectName(
                self.default_branch.clone(),
            )),
        }
    }

    /// Remove a listed branch; names outside the listing are not found
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        if !self.branch_exists(name)? {
            return Err(RepositoryError::BranchNotFound(name.to_string()));
        }

        let branch_path = self.branch_path(&BranchName::try_parse(name)?);

        self.fs.remove_file(&branch_path)?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = name, "branch deleted");

        Ok(())
    }

    pub fn update_branch(&self, name: &str, oid: &ObjectId) -> Result<()> {
        self.write_branch(&BranchName::try_parse(name)?, oid)
    }

    pub fn update_current_branch(&self, oid: &ObjectId) -> Result<()> {
        self.update_branch(&self.current_branch_name()?, oid)
    }

    pub fn set_head(&self, branch: &str) -> Result<()> {
        let branch = BranchName::try_parse(branch)?;
        self.write_ref_file(&self.head_path(), &format!("ref: refs/heads/{branch}\n"))?;
        tracing::debug!(%branch, "HEAD moved");

        Ok(())
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.heads_path().join(name.as_ref())
    }

    fn write_branch(&self, name: &BranchName, oid: &ObjectId) -> Result<()> {
        self.write_ref_file(&self.branch_path(name), &format!("{oid}\n"))?;
        tracing::debug!(branch = %name, %oid, "branch updated");

        Ok(())
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write(path, content.as_bytes())?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        let heads_path = self.heads_path();

        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir == heads_path || !dir.starts_with(&heads_path) {
                break;
            }
            self.fs.remove_empty_dir(dir)?;
            if self.fs.exists(dir) {
                break;
            }
            parent = dir.parent();
        }

        Ok(())
    }
}
