use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub fn reset(&self, revision: &str) -> errors::Result<ObjectId> {
        let _lock = self.lock()?;

        let target_oid = Revision::try_parse(revision)?.resolve(self.database())?;
        let (_, head_commit) = self.head_commit()?;
        let target_commit = self.database().load_commit(&target_oid)?;

        self.materialize(&head_commit, &target_commit)?;
        self.refs().update_head(&target_oid)?;

        Ok(target_oid)
    }
}
