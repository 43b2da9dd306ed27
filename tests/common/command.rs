use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "Test User";
pub const AUTHOR_EMAIL: &str = "test@example.com";
/// `%Y-%m-%d %H:%M:%S %z`
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";
/// [`AUTHOR_DATE`] as printed by `log`
pub const LOG_DATE: &str = "Sun Jan 01 12:00:00 2023 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed on `main`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_nbgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_nbgit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    nbgit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_nbgit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("nbgit").expect("Failed to find nbgit binary");
    cmd.current_dir(dir);
    for key in [
        "NBGIT_HASH_ALGORITHM",
        "NBGIT_DIR",
        "NBGIT_SYSTEM_NAME",
        "NBGIT_DEFAULT_BRANCH",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.envs([
        ("NBGIT_AUTHOR_NAME", AUTHOR_NAME),
        ("NBGIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("NBGIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn nbgit_commit(dir: &Path, message: &str) -> Command {
    run_nbgit_command(dir, &["commit", "-m", message])
}

/// Stage everything and commit it
pub fn add_and_commit(dir: &Path, message: &str) {
    run_nbgit_command(dir, &["add", "."]).assert().success();
    nbgit_commit(dir, message).assert().success();
}

/// Run a command that must succeed and return its stdout
pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}

pub fn metadata_dir(dir: &Path) -> std::path::PathBuf {
    dir.join(".nbgit")
}

/// Commit hash a branch ref holds
pub fn branch_commit_oid(dir: &Path, branch: &str) -> String {
    let ref_path = metadata_dir(dir).join("refs").join("heads").join(branch);
    std::fs::read_to_string(ref_path)
        .expect("Failed to read branch ref")
        .trim()
        .to_string()
}

/// Commit hash of the checked-out branch
pub fn head_commit_oid(dir: &Path) -> String {
    let head = std::fs::read_to_string(metadata_dir(dir).join("HEAD")).expect("Failed to read HEAD");
    let branch = head
        .trim()
        .strip_prefix("ref: refs/heads/")
        .expect("HEAD is not symbolic");

    branch_commit_oid(dir, branch)
}
