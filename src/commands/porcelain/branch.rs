use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{self, BitletError};

impl Repository {
    /// Create a branch pointing at HEAD; the current branch does not change
    pub fn branch(&self, name: &str) -> errors::Result<()> {
        let _lock = self.lock()?;

        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.refs().read_head()?;

        self.refs().create_branch(&branch_name, &head_oid)?;

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn rm_branch(&self, name: &str) -> errors::Result<()> {
        let _lock = self.lock()?;

        let Ok(branch_name) = BranchName::try_parse(name.to_string()) else {
            return Err(BitletError::not_found(
                "A branch with that name does not exist.",
            ));
        };

        if self.refs().is_current_branch(&branch_name)? {
            return Err(BitletError::precondition("Cannot remove the current branch."));
        }

        self.refs().delete_branch(&branch_name)?;

        Ok(())
    }
}
