use crate::common::command::{
    head_commit_oid, init_repository_dir, metadata_dir, repository_dir, run_nbgit_command,
    stdout_of,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn create_branch_at_current_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let oid = head_commit_oid(dir);

    let stdout = stdout_of(run_nbgit_command(dir, &["branch", "dev"]));

    assert_eq!(stdout, format!("Branch 'dev' created at {}...\n", &oid[..7]));
    assert_eq!(
        std::fs::read_to_string(metadata_dir(dir).join("refs").join("heads").join("dev"))?,
        format!("{oid}\n")
    );

    Ok(())
}

#[rstest]
fn list_branches_marks_the_current_one(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_nbgit_command(dir, &["branch", "zeta"]).assert().success();
    run_nbgit_command(dir, &["branch", "alpha"]).assert().success();

    let stdout = stdout_of(run_nbgit_command(dir, &["branch"]));

    assert_eq!(stdout, "  alpha\n* main\n  zeta\n");
}

#[rstest]
fn create_duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_nbgit_command(dir, &["branch", "dev"]).assert().success();

    run_nbgit_command(dir, &["branch", "dev"])
        .assert()
        .code(128)
        .stderr("fatal: A branch named 'dev' already exists.\n");
}

#[rstest]
fn create_branch_without_commits_fails(repository_dir: TempDir) {
    run_nbgit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_nbgit_command(repository_dir.path(), &["branch", "dev"])
        .assert()
        .code(128)
        .stderr("fatal: Not a valid object name: 'main'.\n");
}

#[rstest]
fn delete_flag_requires_a_name(init_repository_dir: TempDir) {
    run_nbgit_command(init_repository_dir.path(), &["branch", "-d"])
        .assert()
        .code(128)
        .stderr("fatal: branch name required\n");
}

#[rstest]
fn delete_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_nbgit_command(dir, &["branch", "dev"]).assert().success();

    let stdout = stdout_of(run_nbgit_command(dir, &["branch", "-d", "dev"]));

    assert_eq!(stdout, "Deleted branch 'dev'\n");
    assert!(!metadata_dir(dir).join("refs").join("heads").join("dev").exists());
}

#[rstest]
fn delete_missing_branch_fails(init_repository_dir: TempDir) {
    run_nbgit_command(init_repository_dir.path(), &["branch", "-d", "nope"])
        .assert()
        .code(1)
        .stderr("error: branch 'nope' not found\n");
}

#[rstest]
fn delete_checked_out_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let root = dir.canonicalize()?;

    run_nbgit_command(dir, &["branch", "-d", "main"])
        .assert()
        .code(1)
        .stderr(format!(
            "error: Cannot delete branch 'main' checked out at '{}'.\n",
            root.display()
        ));

    Ok(())
}

#[rstest]
fn two_arguments_without_delete_flag_fail(init_repository_dir: TempDir) {
    run_nbgit_command(init_repository_dir.path(), &["branch", "x", "y"])
        .assert()
        .code(128)
        .stderr("fatal: Not a valid object name: 'x'.\n");
}

#[rstest]
fn extra_arguments_do_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_nbgit_command(dir, &["branch", "-d", "main", "extra"])
        .assert()
        .success()
        .stdout("");

    assert!(metadata_dir(dir).join("refs").join("heads").join("main").exists());
}

#[rstest]
fn hierarchical_branch_names_are_listed_with_slashes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_nbgit_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    let stdout = stdout_of(run_nbgit_command(dir, &["branch"]));
    assert_eq!(stdout, "  feature/login\n* main\n");

    run_nbgit_command(dir, &["branch", "-d", "feature/login"])
        .assert()
        .success();
    assert!(!metadata_dir(dir).join("refs").join("heads").join("feature").exists());
}

#[rstest]
fn delete_ignores_names_outside_the_branch_list(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_nbgit_command(dir, &["branch", "-d", "../../HEAD"])
        .assert()
        .code(1)
        .stderr("error: branch '../../HEAD' not found\n");

    assert!(metadata_dir(dir).join("HEAD").exists());
    assert_eq!(
        stdout_of(run_nbgit_command(dir, &["status"])),
        "On branch main\nnothing to commit, working tree clean\n"
    );
}

#[rstest]
fn create_rejects_names_that_escape_refs(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let outside = TempDir::new().expect("Failed to create temp dir");
    let target = outside.path().join("evil");
    let target_name = target.display().to_string();

    run_nbgit_command(dir, &["branch", &target_name])
        .assert()
        .code(128)
        .stderr(format!("fatal: '{target_name}' is not a valid branch name.\n"));
    run_nbgit_command(dir, &["branch", "../escaped"])
        .assert()
        .code(128)
        .stderr("fatal: '../escaped' is not a valid branch name.\n");

    assert!(!target.exists());
    assert!(!metadata_dir(dir).join("refs").join("escaped").exists());
    assert_eq!(stdout_of(run_nbgit_command(dir, &["branch"])), "* main\n");
}
