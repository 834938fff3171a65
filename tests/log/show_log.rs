use crate::common::READABLE_COMMIT_DATE;
use crate::common::command::{
    bitlet_merge, commit_file, get_head_commit_sha, init_repository_dir, repository_dir,
    run_bitlet_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn entry(oid: &str, message: &str) -> String {
    format!("===\ncommit {oid}\nDate: {READABLE_COMMIT_DATE}\n{message}\n\n")
}

#[rstest]
fn show_linear_history_newest_first(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_bitlet_command(dir, &["init"]).assert().success();
    let root = get_head_commit_sha(dir)?;

    let first = commit_file(dir, "file1.txt", "content 1\n", "First commit");
    let second = commit_file(dir, "file2.txt", "content 2\n", "Second commit");

    let output = run_bitlet_command(dir, &["log"]).output()?;
    let expected = [
        entry(&second, "Second commit"),
        entry(&first, "First commit"),
        format!("===\ncommit {root}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n"),
    ]
    .concat();

    assert_eq!(String::from_utf8(output.stdout)?, expected);

    Ok(())
}

#[rstest]
fn show_log_of_merge_follows_first_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let base = get_head_commit_sha(dir)?;

    run_bitlet_command(dir, &["branch", "side"]).assert().success();
    let on_master = commit_file(dir, "a.txt", "master edit\n", "master work");
    run_bitlet_command(dir, &["checkout", "side"]).assert().success();
    let on_side = commit_file(dir, "c.txt", "side file\n", "side work");
    run_bitlet_command(dir, &["checkout", "master"]).assert().success();

    bitlet_merge(dir, "side").assert().success().stdout("");
    let merge = get_head_commit_sha(dir)?;

    let output = String::from_utf8(run_bitlet_command(dir, &["log"]).output()?.stdout)?;

    let merge_entry = format!(
        "===\ncommit {merge}\nMerge: {} {}\nDate: {READABLE_COMMIT_DATE}\nMerged side into master\n\n",
        &on_master[..7],
        &on_side[..7]
    );
    assert!(output.starts_with(&merge_entry), "log was:\n{output}");
    assert!(output.contains(&entry(&on_master, "master work")));
    assert!(output.contains(&format!("commit {base}")));
    assert!(!output.contains(&on_side));

    Ok(())
}
