use crate::common::command::{
    commit_file, get_head_commit_sha, init_repository_dir, run_bitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn delete_branch_keeps_its_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_bitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    let feature_commit = commit_file(dir, "c.txt", "gamma\n", "feature work");
    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_bitlet_command(dir, &["rm-branch", "feature"])
        .assert()
        .success()
        .stdout("");

    assert!(!dir.join(".bitlet/refs/heads/feature").exists());
    run_bitlet_command(dir, &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {feature_commit}")));
    run_bitlet_command(dir, &["find", "feature work"])
        .assert()
        .success()
        .stdout(format!("{feature_commit}\n"));

    Ok(())
}

#[rstest]
fn delete_nested_branch_prunes_empty_directories(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "team/feature"])
        .assert()
        .success();

    run_bitlet_command(dir, &["rm-branch", "team/feature"])
        .assert()
        .success();

    assert!(!dir.join(".bitlet/refs/heads/team").exists());
}

#[rstest]
fn delete_missing_branch_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["rm-branch", "ghost"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn delete_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;

    run_bitlet_command(dir, &["rm-branch", "master"])
        .assert()
        .success()
        .stdout("Cannot remove the current branch.\n");

    assert_eq!(get_head_commit_sha(dir)?, head);

    Ok(())
}
