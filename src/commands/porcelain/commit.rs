use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str) -> errors::Result<ObjectId> {
        let _lock = self.lock()?;

        let (commit_id, commit) = self.write_commit(message, None)?;
        let branch = self.refs().current_branch()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
