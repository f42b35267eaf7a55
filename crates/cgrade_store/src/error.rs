//! Error types for store operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while operating on a grade store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation requires an existing store file.
    #[error("store not found at {}: run `cgrade init` first", path.display())]
    NotFound {
        /// The path that was probed.
        path: PathBuf,
    },

    /// `initialize` was called against a file that already exists.
    #[error("store already initialized at {}", path.display())]
    AlreadyInitialized {
        /// The existing store path.
        path: PathBuf,
    },

    /// An aggregate was requested over zero records.
    #[error("no grades recorded")]
    EmptyStore,

    /// A stored line could not be decoded.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number within the store file.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// A record handed to the store cannot be encoded without corrupting the file.
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// Description of the problem.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Creates a malformed record error.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Maps an open failure to [`StoreError::NotFound`] when the file is missing.
    pub(crate) fn from_open(err: io::Error, path: &std::path::Path) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}
