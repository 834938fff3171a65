#![allow(dead_code)]

pub mod command;
pub mod file;

/// Fixed commit timestamp used by every test invocation
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// `COMMIT_DATE` as `log` prints it
pub const READABLE_COMMIT_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

/// Lines of a command's stdout
pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
