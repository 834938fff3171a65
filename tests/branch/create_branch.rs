use crate::common::command::{
    commit_file, get_branch_commit_sha, get_current_branch, get_head_commit_sha,
    init_repository_dir, run_bitlet_command,
};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn create_branch_points_at_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;

    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(get_branch_commit_sha(dir, "feature")?, head);
    assert_eq!(get_current_branch(dir)?, "master");

    // only the current branch moves on commit
    commit_file(dir, "a.txt", "moved on\n", "advance master");
    assert_eq!(get_branch_commit_sha(dir, "feature")?, head);
    assert_ne!(get_head_commit_sha(dir)?, head);

    Ok(())
}

#[rstest]
fn create_branch_with_hierarchical_name(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_bitlet_command(dir, &["branch", "feature/login"])
        .assert()
        .success();

    assert!(
        dir.join(".bitlet/refs/heads/feature/login").is_file(),
        "nested branch ref should be a file"
    );
    run_bitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("=== Branches ===\nfeature/login\n*master\n"));

    Ok(())
}

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();

    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");

    run_bitlet_command(dir, &["branch", "master"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
}
