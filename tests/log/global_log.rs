use crate::common::command::{
    commit_file, get_head_commit_sha, init_repository_dir, run_bitlet_command,
};
use assert_fs::TempDir;
use rstest::rstest;
use std::collections::HashSet;

fn listed_commits(dir: &std::path::Path, command: &str) -> Vec<String> {
    let output = run_bitlet_command(dir, &[command]).output().expect(command);
    crate::common::stdout_lines(&output)
        .into_iter()
        .filter_map(|line| line.strip_prefix("commit ").map(str::to_string))
        .collect()
}

#[rstest]
fn global_log_lists_every_commit_once(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_bitlet_command(dir, &["branch", "side"]).assert().success();
    let on_master = commit_file(dir, "a.txt", "master edit\n", "master work");
    run_bitlet_command(dir, &["checkout", "side"]).assert().success();
    let on_side = commit_file(dir, "c.txt", "side file\n", "side work");

    // orphan a commit by moving side back
    let side_parent = {
        let log = listed_commits(dir, "log");
        log[1].clone()
    };
    run_bitlet_command(dir, &["reset", &side_parent])
        .assert()
        .success();

    let commits = listed_commits(dir, "global-log");
    let unique = commits.iter().collect::<HashSet<_>>();

    assert_eq!(commits.len(), unique.len(), "duplicates in {commits:?}");
    assert_eq!(commits.len(), 4);
    assert!(unique.contains(&on_master));
    assert!(unique.contains(&on_side));
    assert!(unique.contains(&get_head_commit_sha(dir)?));

    Ok(())
}

#[rstest]
fn find_returns_exactly_one_digest_for_a_unique_message(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let m1 = commit_file(dir, "a.txt", "one\n", "m1");
    commit_file(dir, "a.txt", "two\n", "m2");

    run_bitlet_command(dir, &["find", "m1"])
        .assert()
        .success()
        .stdout(format!("{m1}\n"));

    Ok(())
}
