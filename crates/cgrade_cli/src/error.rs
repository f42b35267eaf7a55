//! CLI error type and exit codes.

use cgrade_store::StoreError;
use thiserror::Error;

/// Errors surfaced by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `--format` named an unsupported output format.
    #[error("unknown output format '{0}' (expected text or json)")]
    UnknownFormat(String),

    /// Rendering JSON output failed.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// `2` is shared with clap's own usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Store(err) => match err {
                StoreError::Io(_) => 1,
                StoreError::NotFound { .. } => 3,
                StoreError::EmptyStore => 4,
                StoreError::MalformedRecord { .. } => 5,
                StoreError::InvalidRecord { .. } => 6,
                // Reported by `init` without failing, kept for completeness.
                StoreError::AlreadyInitialized { .. } => 0,
            },
            Self::UnknownFormat(_) => 2,
            Self::Json(_) => 1,
        }
    }
}
