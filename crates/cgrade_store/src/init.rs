//! Store creation and existence probing.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::record::HEADER;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Returns `true` if a file exists at `path`.
///
/// Only existence is checked; the content is not validated.
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Creates a new store containing only the header line.
///
/// The file is created with `create_new`, so an existing file is never
/// truncated or rewritten.
///
/// # Errors
///
/// Returns [`StoreError::AlreadyInitialized`] if the file exists.
pub fn initialize(config: &StoreConfig) -> StoreResult<()> {
    let path = config.path();
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StoreError::AlreadyInitialized {
                path: path.to_path_buf(),
            },
            _ => StoreError::Io(e),
        })?;

    file.write_all(format!("{HEADER}\n").as_bytes())?;
    if config.sync_on_write {
        file.sync_all()?;
    }

    info!(path = %path.display(), "initialized grade store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn initialize_writes_header() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("cgrade.csv"));

        assert!(!exists(config.path()));
        initialize(&config).unwrap();
        assert!(exists(config.path()));
        assert_eq!(
            fs::read_to_string(config.path()).unwrap(),
            "subject;grade;comment\n"
        );
    }

    #[test]
    fn second_initialize_fails_and_keeps_content() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("cgrade.csv"));

        initialize(&config).unwrap();
        let after_first = fs::read(config.path()).unwrap();

        let err = initialize(&config).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyInitialized { .. }));
        assert_eq!(fs::read(config.path()).unwrap(), after_first);
    }

    #[test]
    fn initialize_refuses_any_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not a store").unwrap();

        let err = initialize(&StoreConfig::new(&path)).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyInitialized { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not a store");
    }

    #[test]
    fn initialize_in_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("missing").join("cgrade.csv"));

        assert!(matches!(initialize(&config), Err(StoreError::Io(_))));
    }
}
