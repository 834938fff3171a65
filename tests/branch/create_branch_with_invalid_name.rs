use crate::common::command::{init_repository_dir, run_bitlet_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case::leading_dot(".hidden")]
#[case::double_dot("a..b")]
#[case::lock_suffix("topic.lock")]
#[case::trailing_slash("topic/")]
#[case::caret("topic^")]
#[case::reflog_syntax("topic@{1}")]
#[case::space("my topic")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();

    run_bitlet_command(dir, &["branch", name])
        .assert()
        .success()
        .stdout(format!("Invalid branch name: {name}\n"));

    let heads = std::fs::read_dir(dir.join(".bitlet/refs/heads"))
        .expect("heads dir")
        .count();
    assert_eq!(heads, 1);
}
