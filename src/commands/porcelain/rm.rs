use crate::areas::repository::Repository;
use crate::errors::{self, BitletError};

impl Repository {
    /// Unstage `name`, and stop tracking it if HEAD tracks it
    ///
    /// A tracked file is also deleted from the working directory.
    pub fn rm(&self, name: &str) -> errors::Result<()> {
        let _lock = self.lock()?;

        let (_, head_commit) = self.head_commit()?;
        let mut index = self.index_mut();

        let was_staged = index.is_staged_for_addition(name);
        if was_staged {
            index.unstage(name);
        }

        let is_tracked = head_commit.tracks(name);
        if is_tracked {
            index.stage_removal(name);
            self.workspace().remove_file(name)?;
        }

        if !was_staged && !is_tracked {
            return Err(BitletError::precondition("No reason to remove the file."));
        }

        index.write_updates()?;

        Ok(())
    }
}
