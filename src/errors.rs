//! Error taxonomy for repository operations.
//!
//! Every porcelain command returns [`Result`]. The domain variants carry the
//! exact message shown to the user; `Io` and `Internal` cover infrastructure
//! failures (unreadable files, corrupt objects) and are reported differently
//! by the binary.
//!
//! Lower layers work with `anyhow` and raise domain errors through it. The
//! `From<anyhow::Error>` conversion below recovers such an error instead of
//! burying it inside `Internal`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BitletError>;

#[derive(Debug, Error)]
pub enum BitletError {
    /// Bad or missing command, operands or commit message.
    #[error("{0}")]
    Usage(String),

    /// Repository already initialized, or not initialized.
    #[error("{0}")]
    State(String),

    /// No such commit, branch, object or file.
    #[error("{0}")]
    NotFound(String),

    /// An abbreviated digest matches more than one stored object.
    #[error("Ambiguous object id {prefix}; candidates are: {}", candidates.join(", "))]
    AmbiguousDigest {
        prefix: String,
        candidates: Vec<String>,
    },

    /// Uncommitted changes, nothing to commit, nothing to remove, name collisions.
    #[error("{0}")]
    Precondition(String),

    /// Checkout, reset or merge would clobber a file the current commit does not track.
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(anyhow::Error),
}

impl BitletError {
    pub fn usage(message: impl Into<String>) -> Self {
        BitletError::Usage(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        BitletError::State(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        BitletError::NotFound(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        BitletError::Precondition(message.into())
    }

    /// Domain failures are printed and the process still exits successfully;
    /// everything else is a fatal error.
    pub fn is_domain_error(&self) -> bool {
        !matches!(self, BitletError::Io(_) | BitletError::Internal(_))
    }
}

impl From<anyhow::Error> for BitletError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<BitletError>() {
            Ok(domain_error) => domain_error,
            Err(error) => match error.downcast::<std::io::Error>() {
                Ok(io_error) => BitletError::Io(io_error),
                Err(error) => BitletError::Internal(error),
            },
        }
    }
}
