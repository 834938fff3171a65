use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors;
use std::io::Write;

impl Repository {
    /// First-parent history of HEAD, newest first
    pub fn log(&self) -> errors::Result<()> {
        let head_oid = self.refs().read_head()?;

        for entry in RevList::new(self.database(), [head_oid]) {
            let (commit_oid, commit) = entry?;
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit in the repository, each exactly once
    pub fn global_log(&self) -> errors::Result<()> {
        for entry in self.all_commits()? {
            let (commit_oid, commit) = entry?;
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Histories of all branch tips (by branch name), then every commit
    /// object left in the store (by id), so orphaned commits show up too
    pub(crate) fn all_commits(&self) -> anyhow::Result<RevList<'_>> {
        let mut seeds = Vec::new();
        for branch_name in self.refs().list_branches()? {
            if let Some(tip) = self.refs().read_branch(&branch_name)? {
                seeds.push(tip);
            }
        }

        let mut rev_list = RevList::new(self.database(), seeds);
        for oid in self.database().list_objects()? {
            if self.database().get_object_type(&oid)? == ObjectType::Commit {
                rev_list.push_seed(oid);
            }
        }

        Ok(rev_list)
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit_oid)?;
        if let (Some(parent), Some(second_parent)) = (commit.parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                second_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
