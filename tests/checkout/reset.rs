use crate::common::command::{
    add_files, commit_file, get_current_branch, get_head_commit_sha, init_repository_dir,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn reset_moves_the_current_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = get_head_commit_sha(dir)?;
    commit_file(dir, "c.txt", "gamma\n", "add gamma");
    let latest = commit_file(dir, "a.txt", "alpha 2\n", "edit alpha");

    write_file(FileSpec::new(dir.join("b.txt"), "staged\n".to_string()));
    add_files(dir, &["b.txt"]);

    run_bitlet_command(dir, &["reset", &initial])
        .assert()
        .success()
        .stdout("");

    assert_eq!(get_current_branch(dir)?, "master");
    assert_eq!(get_head_commit_sha(dir)?, initial);
    assert_eq!(read_file(&dir.join("a.txt")), "alpha\n");
    assert_eq!(read_file(&dir.join("b.txt")), "beta\n");
    init_repository_dir
        .child("c.txt")
        .assert(predicate::path::missing());

    run_bitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(latest.as_str()).not());
    run_bitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}

#[rstest]
fn reset_refuses_to_clobber_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = get_head_commit_sha(dir)?;
    let with_c = commit_file(dir, "c.txt", "gamma\n", "add gamma");
    run_bitlet_command(dir, &["reset", &initial])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("c.txt"), "mine\n".to_string()));

    run_bitlet_command(dir, &["reset", &with_c])
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(get_head_commit_sha(dir)?, initial);
    assert_eq!(read_file(&dir.join("c.txt")), "mine\n");

    Ok(())
}

#[rstest]
fn reset_to_unknown_commit_fails(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["reset", "0123456789"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}
