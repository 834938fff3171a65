use crate::artifacts::objects::commit::Contents;
use crate::errors::BitletError;
use std::collections::BTreeSet;

/// Working files that an operation would overwrite or delete although the
/// current commit does not track them
#[derive(Debug, Default)]
pub struct UntrackedConflicts {
    paths: BTreeSet<String>,
}

impl UntrackedConflicts {
    /// Collect every name in `touched` that exists in the working directory
    /// but is untracked by `current`
    pub fn detect<'a>(
        current: &Contents,
        working_files: &BTreeSet<String>,
        touched: impl IntoIterator<Item = &'a String>,
    ) -> Self {
        let paths = touched
            .into_iter()
            .filter(|name| working_files.contains(*name) && !current.contains_key(*name))
            .cloned()
            .collect();

        UntrackedConflicts { paths }
    }

    pub fn paths(&self) -> &BTreeSet<String> {
        &self.paths
    }

    /// Fail with [`BitletError::UntrackedOverwrite`] when anything is in the way
    pub fn ensure_none(&self) -> anyhow::Result<()> {
        if self.paths.is_empty() {
            return Ok(());
        }

        tracing::debug!(paths = ?self.paths, "untracked files in the way");
        Err(BitletError::UntrackedOverwrite.into())
    }
}
