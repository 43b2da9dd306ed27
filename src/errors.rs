//! Error kinds surfaced by repository operations
//!
//! Every failure a caller can observe maps to one variant. The `Display`
//! output is the user-facing message; callers branch on the variant.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("fatal: not a {system_name} repository (or any of the parent directories): {dir_name}")]
    NotARepository {
        system_name: String,
        dir_name: String,
    },

    #[error("usage: {0} init")]
    UsageError(String),

    #[error("fatal: nothing specified, nothing added.")]
    NothingSpecifiedNothingAdded,

    #[error("fatal: pathspec '{0}' did not match any files")]
    PathspecMismatch(String),

    #[error("fatal: '{0}' is not a supported command")]
    NotSupportedCommand(String),

    #[error("{}", nothing_to_commit_message(branch, *is_root))]
    NothingToCommit { branch: String, is_root: bool },

    #[error("fatal: your current branch '{0}' does not have any commits yet")]
    NoCommitsYet(String),

    #[error("fatal: Not a valid object name: '{0}'.")]
    NotValidObjectName(String),

    #[error("fatal: A branch named '{0}' already exists.")]
    BranchAlreadyExists(String),

    #[error("error: Cannot delete branch '{name}' checked out at '{}'.", root.display())]
    CannotDeleteCheckedOutBranch { name: String, root: PathBuf },

    #[error("fatal: '{0}' is not a valid branch name.")]
    InvalidBranchName(String),

    #[error("fatal: branch name required")]
    BranchNameRequired,

    #[error("error: branch '{0}' not found")]
    BranchNotFound(String),

    #[error("fatal: branch HEAD is broken")]
    BrokenBranchHead,

    #[error("fatal: missing branch or commit argument")]
    MissingBranchOrCommitArgument,

    #[error("fatal: repository '{}' not found", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("fatal: object '{0}' not found")]
    ObjectNotFound(String),

    #[error("fatal: corrupt object: {0}")]
    CorruptObject(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RepositoryError {
    /// Process exit status used by the command-line shell.
    pub fn exit_code(&self) -> i32 {
        match self {
            RepositoryError::CannotDeleteCheckedOutBranch { .. }
            | RepositoryError::BranchNotFound(_)
            | RepositoryError::NothingToCommit { .. } => 1,
            _ => 128,
        }
    }
}

/// Message shown when there is nothing to record, shared by `commit` and `status`.
pub fn nothing_to_commit_message(branch: &str, is_root: bool) -> String {
    if is_root {
        format!(
            "On branch {branch}\n\nInitial commit\n\nnothing to commit (create/copy files and use \"add\" to track)"
        )
    } else {
        format!("On branch {branch}\nnothing to commit, working tree clean")
    }
}
