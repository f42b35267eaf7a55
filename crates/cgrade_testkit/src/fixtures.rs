//! Test fixtures and store helpers.

use cgrade_store::{GradeStore, Record, StoreConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A store file inside a temporary directory that is removed on drop.
pub struct TestStore {
    /// The store handle.
    pub store: GradeStore,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates an initialized, empty store.
    pub fn new() -> Self {
        let store = Self::uninitialized();
        store
            .store
            .initialize()
            .expect("Failed to initialize store");
        store
    }

    /// Creates a handle whose backing file does not exist yet.
    pub fn uninitialized() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = StoreConfig::new(temp_dir.path().join("cgrade.csv")).sync_on_write(false);
        Self {
            store: GradeStore::new(config),
            _temp_dir: temp_dir,
        }
    }

    /// Creates a store and appends `records` in order.
    pub fn with_records(records: &[Record]) -> Self {
        let store = Self::new();
        for record in records {
            store.store.append(record).expect("Failed to append record");
        }
        store
    }

    /// Creates a store file with exactly `contents`, bypassing validation.
    pub fn with_contents(contents: &str) -> Self {
        let store = Self::uninitialized();
        fs::write(store.path(), contents).expect("Failed to write store file");
        store
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Returns the raw bytes of the backing file.
    pub fn bytes(&self) -> Vec<u8> {
        fs::read(self.path()).expect("Failed to read store file")
    }

    /// Returns the backing file as text.
    pub fn contents(&self) -> String {
        fs::read_to_string(self.path()).expect("Failed to read store file")
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = GradeStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Three records with a duplicated `(math, 5.2)` pair, told apart by comment.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new("math", 5.2).with_comment("a"),
        Record::new("math", 5.2).with_comment("b"),
        Record::new("math", 4.6).with_comment("c"),
    ]
}
