use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitletError;

impl Repository {
    /// Snapshot the staging index on top of HEAD
    ///
    /// The new commit starts from HEAD's mapping, applies staged additions,
    /// then staged removals. `second_parent` makes it a merge commit, which
    /// may have an empty staging index. On success the index is cleared and
    /// the current branch moves to the new commit.
    pub fn write_commit(
        &self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        if message.trim().is_empty() {
            return Err(BitletError::usage("Please enter a commit message.").into());
        }

        let (head_oid, head_commit) = self.head_commit()?;

        let mut index = self.index_mut();
        if index.is_empty() && second_parent.is_none() {
            return Err(BitletError::precondition("No changes added to the commit.").into());
        }

        let mut contents = head_commit.contents().clone();
        for (name, blob_oid) in index.additions() {
            contents.insert(name.clone(), blob_oid.clone());
        }
        for name in index.removals() {
            contents.remove(name);
        }

        let parents = std::iter::once(head_oid).chain(second_parent).collect();
        let commit = Commit::new(
            parents,
            contents,
            Commit::timestamp_from_env(),
            message.to_string(),
        );
        let commit_id = self.database().store(&commit)?;

        index.clear();
        index.write_updates()?;
        self.refs().update_head(&commit_id)?;

        tracing::debug!(oid = %commit_id, merge = commit.is_merge(), "created commit");

        Ok((commit_id, commit))
    }
}
