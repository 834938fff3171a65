use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors;

impl Repository {
    /// Stage the working version of `name`
    ///
    /// A file identical to the version HEAD tracks is not staged; any pending
    /// change for it is dropped instead.
    pub fn add(&self, name: &str) -> errors::Result<()> {
        let _lock = self.lock()?;

        let blob = self.workspace().parse_blob(name)?;
        let blob_id = blob.object_id()?;
        let (_, head_commit) = self.head_commit()?;

        let mut index = self.index_mut();
        if head_commit.blob_for(name) == Some(&blob_id) {
            index.unstage(name);
        } else {
            self.database().store(&blob)?;
            index.stage_addition(name, blob_id);
        }

        if index.is_changed() {
            index.write_updates()?;
        }

        Ok(())
    }
}
