use crate::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::{self, BitletError};
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create `.bitlet` with the root commit on `master`
    pub fn init(&self) -> errors::Result<()> {
        if self.is_initialized() {
            return Err(BitletError::state(
                "A bitlet version-control system already exists in the current directory.",
            ));
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .bitlet/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .bitlet/refs/heads directory")?;

        let _lock = self.lock()?;

        let root_oid = self.database().store(&Commit::root())?;
        self.index_mut().write_updates()?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().update_branch(&default_branch, &root_oid)?;
        self.refs().set_head(&default_branch)?;

        tracing::debug!(path = %self.path().display(), root = %root_oid, "initialized repository");

        Ok(())
    }
}
