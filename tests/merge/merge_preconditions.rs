use crate::common::command::{
    add_files, bitlet_merge, get_head_commit_sha, init_repository_dir, run_bitlet_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn merge_with_itself_fails(init_repository_dir: TempDir) {
    bitlet_merge(init_repository_dir.path(), "master")
        .assert()
        .success()
        .stdout("Cannot merge a branch with itself.\n");
}

#[rstest]
fn merge_with_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;
    write_file(FileSpec::new(dir.join("c.txt"), "gamma\n".to_string()));
    add_files(dir, &["c.txt"]);

    // uncommitted changes are reported before a missing branch
    bitlet_merge(dir, "ghost")
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");

    assert_eq!(get_head_commit_sha(dir)?, head);

    Ok(())
}

#[rstest]
fn merge_with_missing_branch_fails(init_repository_dir: TempDir) {
    bitlet_merge(init_repository_dir.path(), "ghost")
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}
