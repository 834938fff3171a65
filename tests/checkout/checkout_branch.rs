use crate::common::command::{
    add_files, commit_file, get_current_branch, get_head_commit_sha, init_repository_dir,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::rstest;

/// master tracks a.txt and b.txt; feature replaces b.txt by c.txt and edits a.txt
fn diverge(dir: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_bitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout("");

    run_bitlet_command(dir, &["rm", "b.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("c.txt"), "gamma\n".to_string()));
    add_files(dir, &["c.txt"]);
    commit_file(dir, "a.txt", "alpha on feature\n", "feature changes");

    Ok(())
}

#[rstest]
fn checkout_branch_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let master_head = get_head_commit_sha(dir)?;
    diverge(dir)?;
    let feature_head = get_head_commit_sha(dir)?;

    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(get_current_branch(dir)?, "master");
    assert_eq!(get_head_commit_sha(dir)?, master_head);
    assert_eq!(read_file(&dir.join("a.txt")), "alpha\n");
    assert_eq!(read_file(&dir.join("b.txt")), "beta\n");
    init_repository_dir
        .child("c.txt")
        .assert(predicates::path::missing());

    run_bitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(get_head_commit_sha(dir)?, feature_head);
    assert_eq!(read_file(&dir.join("a.txt")), "alpha on feature\n");
    assert_eq!(read_file(&dir.join("c.txt")), "gamma\n");
    init_repository_dir
        .child("b.txt")
        .assert(predicates::path::missing());

    Ok(())
}

#[rstest]
fn checkout_branch_clears_staging_and_keeps_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "feature"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("notes.txt"), "scratch\n".to_string()));
    write_file(FileSpec::new(dir.join("a.txt"), "staged edit\n".to_string()));
    add_files(dir, &["a.txt"]);

    run_bitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("notes.txt")), "scratch\n");
    assert_eq!(read_file(&dir.join("a.txt")), "alpha\n");
    run_bitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}

#[rstest]
fn checkout_with_untracked_file_in_the_way(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    diverge(dir)?;
    run_bitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    let master_head = get_head_commit_sha(dir)?;

    write_file(FileSpec::new(dir.join("c.txt"), "my own gamma\n".to_string()));

    run_bitlet_command(dir, &["checkout", "feature"])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(get_current_branch(dir)?, "master");
    assert_eq!(get_head_commit_sha(dir)?, master_head);
    assert_eq!(read_file(&dir.join("c.txt")), "my own gamma\n");
    assert_eq!(read_file(&dir.join("b.txt")), "beta\n");

    Ok(())
}

#[rstest]
fn checkout_missing_branch_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", "ghost"])
        .assert()
        .success()
        .stdout("No such branch exists.\n");
}

#[rstest]
fn checkout_current_branch_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");
}
