use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit tracking `a.txt` and `b.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_bitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "alpha\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("b.txt"),
        "beta\n".to_string(),
    ));
    add_files(repository_dir.path(), &["a.txt", "b.txt"]);

    bitlet_commit(repository_dir.path(), "Initial files")
        .assert()
        .success();

    repository_dir
}

pub fn run_bitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitlet").expect("Failed to find bitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("BITLET_DATE", COMMIT_DATE)]);
    cmd.env_remove("BITLET_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn bitlet_commit(dir: &Path, message: &str) -> Command {
    run_bitlet_command(dir, &["commit", message])
}

pub fn bitlet_merge(dir: &Path, branch: &str) -> Command {
    run_bitlet_command(dir, &["merge", branch])
}

pub fn add_files(dir: &Path, files: &[&str]) {
    for file in files {
        run_bitlet_command(dir, &["add", file])
            .assert()
            .success()
            .stdout("");
    }
}

/// Write `content` to `name`, stage it and commit it
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) -> String {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    add_files(dir, &[name]);
    bitlet_commit(dir, message).assert().success();

    get_head_commit_sha(dir).expect("Failed to read HEAD")
}

/// Commit id the current branch points at
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".bitlet").join("HEAD"))?;
    let ref_path = head_content
        .trim()
        .strip_prefix("ref: ")
        .ok_or("HEAD is not a symbolic ref")?;

    let commit_sha = std::fs::read_to_string(dir.join(".bitlet").join(ref_path))?;
    Ok(commit_sha.trim().to_string())
}

pub fn get_branch_commit_sha(
    dir: &Path,
    branch: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let ref_path = dir.join(".bitlet").join("refs").join("heads").join(branch);
    Ok(std::fs::read_to_string(ref_path)?.trim().to_string())
}

pub fn get_current_branch(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".bitlet").join("HEAD"))?;
    let branch = head_content
        .trim()
        .strip_prefix("ref: refs/heads/")
        .ok_or("HEAD is not a symbolic ref")?;

    Ok(branch.to_string())
}
