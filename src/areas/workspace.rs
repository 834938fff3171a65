//! Working directory
//!
//! Only regular files directly inside the repository root are tracked;
//! nested directories (including `.bitlet` itself) are ignored.

use crate::areas::database::Database;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::errors::BitletError;
use crate::REPOSITORY_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, Path};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// A trackable name is one plain file name directly in the root
    ///
    /// Commit objects store one file per line, so line breaks are refused too.
    pub fn is_trackable(name: &str) -> bool {
        let mut components = Path::new(name).components();
        let single_component = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        single_component && name != REPOSITORY_DIR && !name.contains(['\n', '\r'])
    }

    /// Names of the regular files in the working directory
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list {}", self.path.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) if Self::is_trackable(&name) => {
                    files.insert(name);
                }
                Ok(name) => tracing::warn!(?name, "skipping file with an untrackable name"),
                Err(name) => tracing::warn!(?name, "skipping file with a non UTF-8 name"),
            }
        }

        Ok(files)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(name);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read {}", file_path.display()))?;

        Ok(content.into())
    }

    /// Wrap a working file as a blob
    ///
    /// Fails when the file is missing or `name` is not trackable.
    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        if !Self::is_trackable(name) || !self.file_exists(name) {
            return Err(BitletError::not_found("File does not exist.").into());
        }

        Ok(Blob::new(name.to_string(), self.read_file(name)?))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a working file; a file that is already gone is not an error
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        match std::fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => {
                Err(error).with_context(|| format!("Failed to remove file: {:?}", file_path))
            }
        }
    }

    /// Bring the working directory to the migration's target snapshot
    ///
    /// Deletions run first so that additions never collide with stale files.
    pub fn apply_migration(&self, migration: &Migration, database: &Database) -> anyhow::Result<()> {
        for action in [ActionType::Delete, ActionType::Modify, ActionType::Add] {
            for (name, oid) in migration.actions_of(action) {
                match oid {
                    None => self.remove_file(name)?,
                    Some(oid) => self.write_file(name, &database.load_blob_content(oid)?)?,
                }
            }
        }

        tracing::debug!(
            deleted = migration.actions_of(ActionType::Delete).len(),
            modified = migration.actions_of(ActionType::Modify).len(),
            added = migration.actions_of(ActionType::Add).len(),
            "applied migration"
        );

        Ok(())
    }
}
