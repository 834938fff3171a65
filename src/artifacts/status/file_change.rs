use colored::Colorize;

/// How a working file differs from what the next commit would record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for WorkspaceChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        write!(f, "({})", label)
    }
}

/// A file listed under "Modifications Not Staged For Commit"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileChange {
    pub(crate) name: String,
    pub(crate) change: WorkspaceChangeType,
}

impl FileChange {
    pub fn new(name: impl Into<String>, change: WorkspaceChangeType) -> Self {
        FileChange {
            name: name.into(),
            change,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn change(&self) -> WorkspaceChangeType {
        self.change
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.change.to_string().red())
    }
}
