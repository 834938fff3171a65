//! Branch references and HEAD
//!
//! - `refs/heads/<name>` holds the commit id a branch points to
//! - `HEAD` holds `ref: refs/heads/<current branch>`
//!
//! Every ref file is rewritten through a temporary sibling renamed into place.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::BitletError;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (`.bitlet`)
    path: Box<Path>,
}

impl Refs {
    /// The branch HEAD points at
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let content = std::fs::read_to_string(self.head_path())
            .with_context(|| format!("failed to read {}", self.head_path().display()))?;

        BranchName::try_parse_sym_ref(&content)
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.current_branch()? == branch_name)
    }

    /// Commit id of the current branch tip
    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let current_branch = self.current_branch()?;

        self.read_branch(&current_branch)?
            .with_context(|| format!("HEAD points to missing branch {current_branch}"))
    }

    /// Point HEAD at another branch
    pub fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.write_ref_file(&self.head_path(), &branch_name.to_sym_ref())?;
        tracing::debug!(branch = %branch_name, "moved HEAD");

        Ok(())
    }

    /// Move the current branch (and thus HEAD) to a commit
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let current_branch = self.current_branch()?;
        self.update_branch(&current_branch, oid)
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch_name);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read ref file at {:?}", branch_path))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    pub fn update_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.write_ref_file(&self.branch_path(branch_name), oid.as_ref())?;
        tracing::debug!(branch = %branch_name, oid = %oid, "updated branch");

        Ok(())
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(BitletError::precondition("A branch with that name already exists.").into());
        }

        self.update_branch(branch_name, oid)
    }

    /// Remove a branch pointer; the commits it named stay in the store
    pub fn delete_branch(&self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        let oid = self.read_branch(branch_name)?.ok_or_else(|| {
            BitletError::not_found("A branch with that name does not exist.")
        })?;

        let branch_path = self.branch_path(branch_name);
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(branch = %branch_name, oid = %oid, "deleted branch");

        Ok(oid)
    }

    /// Every branch, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = Vec::new();

        for entry in WalkDir::new(&heads_path).min_depth(1) {
            let entry = entry.context("failed to walk branch refs")?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(&heads_path)
                .context("branch ref outside refs/heads")?;
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            // skip leftover temp files
            if let Ok(branch_name) = BranchName::try_parse(name) {
                branches.push(branch_name);
            }
        }

        branches.sort();
        Ok(branches)
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("invalid ref path {:?}", path))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directories for {:?}", path))?;

        let temp_path = parent.join(format!(".tmp-ref-{}.lock", rand::random::<u32>()));
        let mut temp_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("failed to open ref file at {:?}", temp_path))?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.write_all(b"\n")?;
        temp_file.sync_all()?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to replace ref file at {:?}", path))?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.heads_path().join(branch_name.as_ref()).into_boxed_path()
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
