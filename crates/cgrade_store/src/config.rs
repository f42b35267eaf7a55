//! Store configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default location of the store file.
pub const DEFAULT_STORE_PATH: &str = "./cgrade.csv";

/// Suffix appended to the store file name for the compaction temp file.
const TEMP_SUFFIX: &str = ".tmp";

/// Configuration threaded into every store operation.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the backing file.
    pub path: PathBuf,

    /// Whether `append` initializes a missing store instead of failing.
    pub create_if_missing: bool,

    /// Whether to fsync after `initialize` and `append`.
    pub sync_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            create_if_missing: false,
            sync_on_write: true,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for the store at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets whether `append` creates the store when it is missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether writes are synced to disk.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the temp file used while compacting.
    ///
    /// It sits in the same directory as the store so the final rename never
    /// crosses a filesystem boundary.
    #[must_use]
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("cgrade.csv"));
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}
