use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::UntrackedConflicts;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::merge::conflict_file::conflict_content;
use crate::artifacts::merge::resolution::{FileResolution, MergeResolution};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{self, BitletError};
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

/// What a merge did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target branch is already part of the current history
    AlreadyUpToDate,
    /// The current branch moved to the target tip without a new commit
    FastForwarded(ObjectId),
    /// A merge commit was created; `conflicts` lists the files with markers
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

impl Repository {
    pub fn merge(&self, target: &str) -> errors::Result<MergeOutcome> {
        let _lock = self.lock()?;

        let current_branch = self.refs().current_branch()?;
        if current_branch.as_ref() == target {
            return Err(BitletError::precondition(
                "Cannot merge a branch with itself.",
            ));
        }

        if !self.index().is_empty() {
            return Err(BitletError::precondition("You have uncommitted changes."));
        }

        let target_branch = BranchName::try_parse(target.to_string())
            .ok()
            .filter(|branch_name| self.refs().branch_exists(branch_name))
            .ok_or_else(|| BitletError::not_found("A branch with that name does not exist."))?;
        let target_oid = self
            .refs()
            .read_branch(&target_branch)?
            .ok_or_else(|| BitletError::not_found("A branch with that name does not exist."))?;

        let (head_oid, head_commit) = self.head_commit()?;
        let base_oid = self.merge_base(&head_oid, &target_oid)?;

        if base_oid == target_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        let target_commit = self.database().load_commit(&target_oid)?;

        if base_oid == head_oid {
            self.materialize(&head_commit, &target_commit)?;
            self.refs().update_head(&target_oid)?;

            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForwarded(target_oid));
        }

        let base_commit = self.database().load_commit(&base_oid)?;
        let resolution = MergeResolution::resolve(
            base_commit.contents(),
            head_commit.contents(),
            target_commit.contents(),
        );

        let working_files = self.workspace().list_files()?;
        UntrackedConflicts::detect(head_commit.contents(), &working_files, resolution.touched())
            .ensure_none()?;

        self.apply_resolution(&resolution, &current_branch, &target_branch)?;

        let conflicts = resolution.conflicts().cloned().collect::<Vec<_>>();
        if !conflicts.is_empty() {
            writeln!(self.writer(), "{}", "Encountered a merge conflict.".red())?;
        }

        let message = format!("Merged {} into {}", target_branch, current_branch);
        let (commit_oid, _) = self.write_commit(&message, Some(target_oid))?;

        tracing::debug!(
            base = %base_oid,
            commit = %commit_oid,
            conflicts = conflicts.len(),
            "merged {} into {}",
            target_branch,
            current_branch
        );

        Ok(MergeOutcome::Merged {
            commit: commit_oid,
            conflicts,
        })
    }

    fn merge_base(&self, head_oid: &ObjectId, target_oid: &ObjectId) -> anyhow::Result<ObjectId> {
        let database = self.database();
        let finder = BCAFinder::new(|oid: &ObjectId| {
            database
                .load_commit(oid)
                .map(|commit: Commit| commit.to_slim(oid.clone()))
        });

        finder
            .find_best_common_ancestor(head_oid, target_oid)?
            .with_context(|| format!("{head_oid} and {target_oid} share no history"))
    }

    /// Write and stage every file the resolution decided on
    fn apply_resolution(
        &self,
        resolution: &MergeResolution,
        current_branch: &BranchName,
        target_branch: &BranchName,
    ) -> anyhow::Result<()> {
        let database = self.database();
        let workspace = self.workspace();
        let mut index = self.index_mut();

        for (name, file_resolution) in resolution.resolutions() {
            match file_resolution {
                FileResolution::TakeTarget(blob_oid) => {
                    workspace.write_file(name, &database.load_blob_content(blob_oid)?)?;
                    index.stage_addition(name, blob_oid.clone());
                }
                FileResolution::Remove => {
                    workspace.remove_file(name)?;
                    index.stage_removal(name);
                }
                FileResolution::Conflict { current, target } => {
                    let current = current
                        .as_ref()
                        .map(|oid| database.load_blob_content(oid))
                        .transpose()?;
                    let target = target
                        .as_ref()
                        .map(|oid| database.load_blob_content(oid))
                        .transpose()?;

                    let content = conflict_content(
                        current_branch.as_ref(),
                        target_branch.as_ref(),
                        current.as_deref(),
                        target.as_deref(),
                    );
                    workspace.write_file(name, &content)?;

                    let blob_oid = database.store(&Blob::new(name.clone(), content.into()))?;
                    index.stage_addition(name, blob_oid);
                }
            }
        }

        Ok(())
    }
}
