use crate::common::command::{
    bitlet_merge, commit_file, get_head_commit_sha, init_repository_dir, run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use rstest::rstest;

/// master and side both start from a.txt = "alpha\n", b.txt = "beta\n"
#[rstest]
fn merge_takes_changes_made_only_on_the_target(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "side"]).assert().success();

    // master: edit a.txt
    commit_file(dir, "a.txt", "alpha on master\n", "master edits a");

    // side: edit b.txt, add s.txt, leave a.txt alone
    run_bitlet_command(dir, &["checkout", "side"]).assert().success();
    commit_file(dir, "b.txt", "beta on side\n", "side edits b");
    commit_file(dir, "s.txt", "side only\n", "side adds s");
    run_bitlet_command(dir, &["checkout", "master"]).assert().success();

    bitlet_merge(dir, "side").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("a.txt")), "alpha on master\n");
    assert_eq!(read_file(&dir.join("b.txt")), "beta on side\n");
    assert_eq!(read_file(&dir.join("s.txt")), "side only\n");

    run_bitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ));

    Ok(())
}

#[rstest]
fn merge_removes_files_deleted_on_the_target(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "side"]).assert().success();
    commit_file(dir, "c.txt", "gamma\n", "master adds c");

    run_bitlet_command(dir, &["checkout", "side"]).assert().success();
    run_bitlet_command(dir, &["rm", "b.txt"]).assert().success();
    crate::common::command::bitlet_commit(dir, "side drops b")
        .assert()
        .success();
    run_bitlet_command(dir, &["checkout", "master"]).assert().success();

    bitlet_merge(dir, "side").assert().success().stdout("");

    init_repository_dir
        .child("b.txt")
        .assert(predicate::path::missing());
    let head = get_head_commit_sha(dir)?;
    run_bitlet_command(dir, &["checkout", &head, "--", "b.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");

    Ok(())
}

#[rstest]
fn merge_refuses_to_clobber_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "side"]).assert().success();
    commit_file(dir, "a.txt", "alpha on master\n", "master edits a");
    run_bitlet_command(dir, &["checkout", "side"]).assert().success();
    commit_file(dir, "s.txt", "side only\n", "side adds s");
    run_bitlet_command(dir, &["checkout", "master"]).assert().success();
    let head = get_head_commit_sha(dir)?;

    write_file(FileSpec::new(dir.join("s.txt"), "mine\n".to_string()));

    bitlet_merge(dir, "side")
        .assert()
        .success()
        .stdout(
            "There is an untracked file in the way; delete it, or add and commit it first.\n",
        );

    assert_eq!(get_head_commit_sha(dir)?, head);
    assert_eq!(read_file(&dir.join("s.txt")), "mine\n");

    Ok(())
}

/// Once side has merged master, the next merge must split from that merge
/// commit, not from the original branch point
#[rstest]
fn merge_after_an_earlier_merge_uses_latest_common_ancestor(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_bitlet_command(dir, &["branch", "side"]).assert().success();
    commit_file(dir, "m.txt", "m1\n", "master 1");

    run_bitlet_command(dir, &["checkout", "side"]).assert().success();
    commit_file(dir, "s.txt", "s1\n", "side 1");

    // side merges master, then master catches up with side
    bitlet_merge(dir, "master").assert().success();
    run_bitlet_command(dir, &["checkout", "master"]).assert().success();
    bitlet_merge(dir, "side")
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    // both now agree; diverge again and merge cleanly
    commit_file(dir, "m.txt", "m2\n", "master 2");
    run_bitlet_command(dir, &["checkout", "side"]).assert().success();
    commit_file(dir, "s.txt", "s2\n", "side 2");
    run_bitlet_command(dir, &["checkout", "master"]).assert().success();

    bitlet_merge(dir, "side").assert().success().stdout("");

    assert_eq!(read_file(&dir.join("m.txt")), "m2\n");
    assert_eq!(read_file(&dir.join("s.txt")), "s2\n");

    Ok(())
}
