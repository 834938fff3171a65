use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{self, BitletError};
use crate::REPOSITORY_DIR;
use anyhow::Context;
use file_guard::FileGuard;
use std::cell::{Ref, RefCell, RefMut};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Name of the advisory lock file inside the repository directory
const LOCK_FILE_NAME: &str = "lock";

/// Exclusive hold on the repository; released on drop
pub struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

/// One invocation's view of a repository
///
/// Loaded once per command and threaded through every operation: the object
/// store, the staging index, the refs and the working directory.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Build a repository rooted at `path` without touching the disk
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let repository_dir = path.join(REPOSITORY_DIR);

        let index = Index::new(repository_dir.join("index").into_boxed_path());
        let database = Database::new(repository_dir.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_dir.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open an initialized repository and load its staging index
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> errors::Result<Self> {
        let repository = Self::new(path, writer)?;

        if !repository.is_initialized() {
            return Err(BitletError::state("Not in an initialized bitlet directory."));
        }

        repository.index.borrow_mut().rehydrate()?;
        Ok(repository)
    }

    pub fn is_initialized(&self) -> bool {
        self.repository_dir().is_dir()
    }

    /// Take the repository lock for the duration of a mutating command
    ///
    /// The staging index is reloaded once the lock is held, so changes staged
    /// by an invocation that held the lock before us are not overwritten.
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        let lock_path = self.repository_dir().join(LOCK_FILE_NAME);
        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Unable to open {}", lock_path.display()))?;

        let guard = file_guard::lock(Box::new(lock_file), file_guard::Lock::Exclusive, 0, 1)
            .with_context(|| format!("Unable to lock {}", lock_path.display()))?;
        self.index.borrow_mut().rehydrate()?;

        Ok(RepositoryLock { _guard: guard })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_dir(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Ref<'_, Index> {
        self.index.borrow()
    }

    pub fn index_mut(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The commit HEAD points at, with its id
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let commit = self.database.load_commit(&head_oid)?;

        Ok((head_oid, commit))
    }
}
