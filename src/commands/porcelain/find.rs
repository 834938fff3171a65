use crate::areas::repository::Repository;
use crate::errors::{self, BitletError};
use std::io::Write;

impl Repository {
    /// Print the id of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> errors::Result<Vec<String>> {
        let mut matches = Vec::new();

        for entry in self.all_commits()? {
            let (commit_oid, commit) = entry?;
            if commit.message() == message {
                matches.push(commit_oid.to_string());
            }
        }

        if matches.is_empty() {
            return Err(BitletError::not_found("Found no commit with that message."));
        }

        let mut writer = self.writer();
        for commit_oid in &matches {
            writeln!(writer, "{}", commit_oid)?;
        }

        Ok(matches)
    }
}
