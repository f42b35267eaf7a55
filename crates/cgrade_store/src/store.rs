//! File-backed grade store.

use crate::compactor::{Compactor, DeleteOutcome, DeleteTarget};
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::reader::RecordReader;
use crate::record::Record;
use crate::summary::{self, Summary};
use crate::{init, writer};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Streaming iterator over the records of an opened store file.
pub type Records = RecordReader<BufReader<File>>;

/// Handle to a grade store file.
///
/// The handle only carries configuration. Every operation opens the file,
/// does its work and closes it again; nothing is cached between calls.
///
/// # Example
///
/// ```rust
/// use cgrade_store::{GradeStore, Record, StoreConfig};
///
/// let dir = tempfile::tempdir()?;
/// let store = GradeStore::new(StoreConfig::new(dir.path().join("cgrade.csv")));
///
/// store.initialize()?;
/// store.append(&Record::new("algd2", 5.0))?;
/// store.append(&Record::new("algd2", 6.0).with_comment("retake"))?;
///
/// let records = store.list(Some("algd2"))?;
/// assert_eq!(GradeStore::average(&records)?, 5.5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GradeStore {
    config: StoreConfig,
}

impl GradeStore {
    /// Creates a handle for the configured store.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Creates a handle for the store at `path` with default settings.
    #[must_use]
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(StoreConfig::new(path.as_ref()))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Returns `true` if the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        init::exists(self.config.path())
    }

    /// Creates the backing file with only the header line.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if the file exists.
    pub fn initialize(&self) -> StoreResult<()> {
        init::initialize(&self.config)
    }

    /// Appends a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the store is missing (unless `create_if_missing`
    /// is set) and `InvalidRecord` if the record cannot be encoded safely.
    pub fn append(&self, record: &Record) -> StoreResult<()> {
        writer::append(&self.config, record)
    }

    /// Opens a streaming iterator over the records, optionally for one subject.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the store is missing or `MalformedRecord` if the
    /// header is wrong. Errors in later lines are yielded by the iterator.
    pub fn records(&self, subject: Option<&str>) -> StoreResult<Records> {
        RecordReader::open(self.config.path(), subject)
    }

    /// Reads all records, optionally for one subject.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable or malformed line.
    pub fn list(&self, subject: Option<&str>) -> StoreResult<Vec<Record>> {
        self.records(subject)?.collect()
    }

    /// Returns the mean grade of `records`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyStore` if `records` is empty.
    pub fn average(records: &[Record]) -> StoreResult<f64> {
        summary::average(records)
    }

    /// Lists records and computes their averages.
    ///
    /// # Errors
    ///
    /// Returns `EmptyStore` if no record matches, plus any error of
    /// [`GradeStore::list`].
    pub fn summarize(&self, subject: Option<&str>) -> StoreResult<Summary> {
        Summary::from_records(self.list(subject)?)
    }

    /// Deletes the `occurrence`-th record (1-based) matching `(subject, grade)`.
    ///
    /// # Errors
    ///
    /// See [`Compactor::delete`].
    pub fn delete(&self, subject: &str, grade: f64, occurrence: usize) -> StoreResult<DeleteOutcome> {
        Compactor::new(&self.config).delete(&DeleteTarget::occurrence(subject, grade, occurrence))
    }

    /// Deletes the most recently appended record.
    ///
    /// Returns the removed record, or `None` if the store holds no records.
    ///
    /// # Errors
    ///
    /// See [`Compactor::delete`].
    pub fn delete_latest(&self) -> StoreResult<Option<Record>> {
        let outcome = Compactor::new(&self.config).delete(&DeleteTarget::Latest)?;
        Ok(outcome.removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::fs;
    use tempfile::tempdir;

    fn new_store(dir: &Path) -> GradeStore {
        let store = GradeStore::at(dir.join("cgrade.csv"));
        store.initialize().unwrap();
        store
    }

    #[test]
    fn append_then_list() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        let r1 = Record::new("algd2", 5.25).with_comment("test 1");
        let r2 = Record::new("math", 4.75);

        store.append(&r1).unwrap();
        store.append(&r2).unwrap();

        assert_eq!(store.list(None).unwrap(), vec![r1, r2]);
    }

    #[test]
    fn subject_filter_keeps_relative_order() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        for (subject, grade) in [("algd2", 4.0), ("math", 5.0), ("algd2", 5.5), ("algd2", 6.0)] {
            store.append(&Record::new(subject, grade)).unwrap();
        }

        let grades: Vec<_> = store
            .list(Some("algd2"))
            .unwrap()
            .iter()
            .map(|r| r.grade)
            .collect();
        assert_eq!(grades, [4.0, 5.5, 6.0]);
    }

    #[test]
    fn delete_by_occurrence() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        store.append(&Record::new("math", 5.2).with_comment("a")).unwrap();
        store.append(&Record::new("math", 5.2).with_comment("b")).unwrap();
        store.append(&Record::new("math", 4.6).with_comment("c")).unwrap();

        let outcome = store.delete("math", 5.2, 1).unwrap();
        assert!(outcome.deleted);

        let comments: Vec<_> = store
            .list(None)
            .unwrap()
            .into_iter()
            .map(|r| r.comment)
            .collect();
        assert_eq!(comments, ["b", "c"]);
    }

    #[test]
    fn delete_no_match_is_byte_identical() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        store.append(&Record::new("math", 5.2).with_comment("a")).unwrap();
        let before = fs::read(store.path()).unwrap();

        let outcome = store.delete("phys", 1.0, 1).unwrap();

        assert!(!outcome.deleted);
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn delete_latest_removes_most_recent() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        store.append(&Record::new("math", 5.0)).unwrap();
        store.append(&Record::new("phys", 4.0)).unwrap();

        let removed = store.delete_latest().unwrap();
        assert_eq!(removed, Some(Record::new("phys", 4.0)));
        assert_eq!(store.list(None).unwrap(), vec![Record::new("math", 5.0)]);

        store.delete_latest().unwrap();
        assert_eq!(store.delete_latest().unwrap(), None);
    }

    #[test]
    fn summarize_empty_store_fails() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());

        assert!(matches!(store.summarize(None), Err(StoreError::EmptyStore)));
    }

    #[test]
    fn summarize_unknown_subject_fails() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        store.append(&Record::new("math", 5.0)).unwrap();

        assert!(matches!(
            store.summarize(Some("bio")),
            Err(StoreError::EmptyStore)
        ));
    }

    #[test]
    fn list_surfaces_malformed_lines() {
        let dir = tempdir().unwrap();
        let store = new_store(dir.path());
        fs::write(store.path(), "subject;grade;comment\nmath;x;\n").unwrap();

        assert!(matches!(
            store.list(None),
            Err(StoreError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn operations_on_missing_store_are_not_found() {
        let dir = tempdir().unwrap();
        let store = GradeStore::at(dir.path().join("missing.csv"));

        assert!(!store.exists());
        assert!(matches!(store.list(None), Err(StoreError::NotFound { .. })));
        assert!(matches!(
            store.append(&Record::new("math", 5.0)),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete("math", 5.0, 1),
            Err(StoreError::NotFound { .. })
        ));
    }
}
