use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::errors::{self, BitletError};

impl Repository {
    /// Restore one file from HEAD, or from `revision` when given
    ///
    /// Only the working file changes; nothing is staged.
    pub fn checkout_file(&self, revision: Option<&str>, name: &str) -> errors::Result<()> {
        let _lock = self.lock()?;

        let commit = match revision {
            Some(revision) => {
                let commit_oid = Revision::try_parse(revision)?.resolve(self.database())?;
                self.database().load_commit(&commit_oid)?
            }
            None => self.head_commit()?.1,
        };

        let blob_oid = commit
            .blob_for(name)
            .ok_or_else(|| BitletError::not_found("File does not exist in that commit."))?;
        let content = self.database().load_blob_content(blob_oid)?;
        self.workspace().write_file(name, &content)?;

        Ok(())
    }

    /// Switch to another branch, replacing the working files
    pub fn checkout_branch(&self, name: &str) -> errors::Result<()> {
        let _lock = self.lock()?;

        let branch_name = BranchName::try_parse(name.to_string())
            .ok()
            .filter(|branch_name| self.refs().branch_exists(branch_name))
            .ok_or_else(|| BitletError::not_found("No such branch exists."))?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(BitletError::precondition(
                "No need to checkout the current branch.",
            ));
        }

        let target_oid = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| BitletError::not_found("No such branch exists."))?;
        let (_, head_commit) = self.head_commit()?;
        let target_commit = self.database().load_commit(&target_oid)?;

        self.materialize(&head_commit, &target_commit)?;
        self.refs().set_head(&branch_name)?;

        Ok(())
    }

    /// Replace the working files of `current` by those of `target` and clear
    /// the staging index
    ///
    /// Nothing is written when an untracked file is in the way.
    pub(crate) fn materialize(&self, current: &Commit, target: &Commit) -> anyhow::Result<()> {
        let working_files = self.workspace().list_files()?;
        let migration = Migration::plan(current.contents(), target.contents(), &working_files);
        migration.ensure_safe()?;

        self.workspace()
            .apply_migration(&migration, self.database())?;

        let mut index = self.index_mut();
        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
