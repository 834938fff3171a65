use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Contents;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{FileChange, WorkspaceChangeType};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Everything `status` prints, each section sorted by name
#[derive(Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub current_branch: BranchName,
    pub branches: Vec<BranchName>,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<FileChange>,
    pub untracked: Vec<String>,
}

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    pub fn inspect(&self) -> anyhow::Result<StatusReport> {
        let refs = self.repository.refs();
        let (_, head_commit) = self.repository.head_commit()?;
        let index = self.repository.index();

        let working_files = self.working_blobs()?;

        Ok(StatusReport {
            current_branch: refs.current_branch()?,
            branches: refs.list_branches()?,
            staged: index.additions().keys().cloned().collect(),
            removed: index.removals().iter().cloned().collect(),
            modified: Self::unstaged_changes(
                head_commit.contents(),
                index.additions(),
                index.removals(),
                &working_files,
            ),
            untracked: Self::untracked_files(
                head_commit.contents(),
                index.additions(),
                index.removals(),
                &working_files,
            ),
        })
    }

    /// Blob id every working file would get if it were staged now
    fn working_blobs(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        let workspace = self.repository.workspace();

        workspace
            .list_files()?
            .into_iter()
            .map(|name| {
                let oid = Blob::new(name.clone(), workspace.read_file(&name)?).object_id()?;
                Ok((name, oid))
            })
            .collect()
    }

    pub fn unstaged_changes(
        head: &Contents,
        additions: &BTreeMap<String, ObjectId>,
        removals: &BTreeSet<String>,
        working_files: &BTreeMap<String, ObjectId>,
    ) -> Vec<FileChange> {
        let mut changes = BTreeMap::new();

        for (name, head_oid) in head {
            if additions.contains_key(name) || removals.contains(name) {
                continue;
            }

            match working_files.get(name) {
                None => {
                    changes.insert(name, WorkspaceChangeType::Deleted);
                }
                Some(working_oid) if working_oid != head_oid => {
                    changes.insert(name, WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        for (name, staged_oid) in additions {
            match working_files.get(name) {
                None => {
                    changes.insert(name, WorkspaceChangeType::Deleted);
                }
                Some(working_oid) if working_oid != staged_oid => {
                    changes.insert(name, WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        changes
            .into_iter()
            .map(|(name, change)| FileChange::new(name.clone(), change))
            .collect()
    }

    pub fn untracked_files(
        head: &Contents,
        additions: &BTreeMap<String, ObjectId>,
        removals: &BTreeSet<String>,
        working_files: &BTreeMap<String, ObjectId>,
    ) -> Vec<String> {
        working_files
            .keys()
            .filter(|name| {
                removals.contains(*name)
                    || (!additions.contains_key(*name) && !head.contains_key(*name))
            })
            .cloned()
            .collect()
    }
}
