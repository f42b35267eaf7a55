//! Store compaction.
//!
//! Deleting a record rewrites the whole store into a temp file that omits the
//! target line, then renames the temp file over the original.
//!
//! ## Invariants
//!
//! - Every kept line is copied byte for byte, header included
//! - The original file is only replaced after the temp file was fully written
//!   and synced
//! - Any failure before the rename leaves the original untouched and removes
//!   the temp file

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::reader::{is_blank, Lines};
use crate::record::Record;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Destination of a compaction rewrite.
///
/// `finish` must make everything written so far durable. The compactor only
/// replaces the original file after `finish` returned `Ok`.
pub trait TempSink: Write {
    /// Flushes and syncs the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the data could not be made durable.
    fn finish(self) -> io::Result<()>;
}

impl TempSink for File {
    fn finish(mut self) -> io::Result<()> {
        self.flush()?;
        self.sync_all()
    }
}

impl<W: TempSink> TempSink for BufWriter<W> {
    fn finish(self) -> io::Result<()> {
        let inner = self.into_inner().map_err(io::IntoInnerError::into_error)?;
        inner.finish()
    }
}

/// Selects the record a compaction removes.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    /// The `occurrence`-th record (1-based) matching `(subject, grade)`.
    Occurrence {
        /// Exact subject to match.
        subject: String,
        /// Exact grade to match.
        grade: f64,
        /// Rank among matching records. `0` never matches.
        occurrence: usize,
    },
    /// The last record in the store.
    Latest,
}

impl DeleteTarget {
    /// Targets the `occurrence`-th record matching `(subject, grade)`.
    pub fn occurrence(subject: impl Into<String>, grade: f64, occurrence: usize) -> Self {
        Self::Occurrence {
            subject: subject.into(),
            grade,
            occurrence,
        }
    }
}

/// Result of a delete.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    /// Whether a record was removed.
    pub deleted: bool,
    /// The removed record, if any.
    pub removed: Option<Record>,
    /// Number of records left in the store.
    pub kept: usize,
}

/// Rewrites `source` into `sink`, omitting the record selected by `target`.
///
/// This is the streaming half of a delete and does not touch the filesystem.
///
/// # Errors
///
/// Returns [`StoreError::MalformedRecord`] if the header or any data line
/// cannot be decoded, and [`StoreError::Io`] if reading or writing fails.
pub fn rewrite<R: BufRead, W: Write>(
    source: R,
    sink: &mut W,
    target: &DeleteTarget,
) -> StoreResult<DeleteOutcome> {
    let mut lines = Lines::new(source);
    let header = lines.read_header()?;
    sink.write_all(header.as_bytes())?;

    match target {
        DeleteTarget::Occurrence {
            subject,
            grade,
            occurrence,
        } => rewrite_occurrence(&mut lines, sink, subject, *grade, *occurrence),
        DeleteTarget::Latest => rewrite_without_latest(&mut lines, sink),
    }
}

fn rewrite_occurrence<R: BufRead, W: Write>(
    lines: &mut Lines<R>,
    sink: &mut W,
    subject: &str,
    grade: f64,
    occurrence: usize,
) -> StoreResult<DeleteOutcome> {
    let mut match_count = 0usize;
    let mut removed = None;
    let mut kept = 0usize;

    while let Some(line) = lines.next_line()? {
        if is_blank(&line) {
            sink.write_all(line.as_bytes())?;
            continue;
        }

        let record = Record::decode(&line, lines.line_no())?;
        if removed.is_none() && record.matches(subject, grade) {
            match_count += 1;
            if match_count == occurrence {
                removed = Some(record);
                continue;
            }
        }

        sink.write_all(line.as_bytes())?;
        kept += 1;
    }

    Ok(DeleteOutcome {
        deleted: removed.is_some(),
        removed,
        kept,
    })
}

fn rewrite_without_latest<R: BufRead, W: Write>(
    lines: &mut Lines<R>,
    sink: &mut W,
) -> StoreResult<DeleteOutcome> {
    // The most recent record is held back until a later one shows up, along
    // with any blank lines that follow it.
    let mut held: Option<(Record, String)> = None;
    let mut trailing = String::new();
    let mut kept = 0usize;

    while let Some(line) = lines.next_line()? {
        if is_blank(&line) {
            if held.is_some() {
                trailing.push_str(&line);
            } else {
                sink.write_all(line.as_bytes())?;
            }
            continue;
        }

        let record = Record::decode(&line, lines.line_no())?;
        if let Some((_, raw)) = held.replace((record, line)) {
            sink.write_all(raw.as_bytes())?;
            sink.write_all(trailing.as_bytes())?;
            trailing.clear();
            kept += 1;
        }
    }

    sink.write_all(trailing.as_bytes())?;
    let removed = held.map(|(record, _)| record);

    Ok(DeleteOutcome {
        deleted: removed.is_some(),
        removed,
        kept,
    })
}

/// Performs deletes against the store file described by a [`StoreConfig`].
///
/// ## Example
///
/// ```no_run
/// use cgrade_store::{Compactor, DeleteTarget, StoreConfig};
///
/// let config = StoreConfig::new("cgrade.csv");
/// let outcome = Compactor::new(&config).delete(&DeleteTarget::occurrence("math", 5.2, 1))?;
/// println!("deleted: {}", outcome.deleted);
/// # Ok::<(), cgrade_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct Compactor<'a> {
    config: &'a StoreConfig,
}

impl<'a> Compactor<'a> {
    /// Creates a compactor for the configured store.
    #[must_use]
    pub fn new(config: &'a StoreConfig) -> Self {
        Self { config }
    }

    /// Deletes the record selected by `target`.
    ///
    /// The store is rewritten even when nothing matches; the result is then a
    /// byte-identical copy and `deleted` is `false`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the store does not exist. Any other
    /// error leaves the original file untouched. Once the temp file has
    /// replaced the store the delete succeeds; a failure to sync the parent
    /// directory afterwards is only logged.
    pub fn delete(&self, target: &DeleteTarget) -> StoreResult<DeleteOutcome> {
        self.delete_with(target, BufWriter::new)
    }

    /// Like [`Compactor::delete`], wrapping the temp file with `wrap` before
    /// writing to it.
    ///
    /// # Errors
    ///
    /// See [`Compactor::delete`].
    pub fn delete_with<S, F>(&self, target: &DeleteTarget, wrap: F) -> StoreResult<DeleteOutcome>
    where
        S: TempSink,
        F: FnOnce(File) -> S,
    {
        let path = self.config.path();
        let temp_path = self.config.temp_path();

        let source = File::open(path).map_err(|e| StoreError::from_open(e, path))?;
        let temp = File::create(&temp_path)?;
        // The replacement inherits the store's permissions.
        if let Err(err) = copy_permissions(&source, &temp) {
            discard(&temp_path);
            return Err(err.into());
        }
        debug!(
            path = %path.display(),
            temp = %temp_path.display(),
            ?target,
            "rewriting store"
        );

        let outcome = match write_replacement(BufReader::new(source), wrap(temp), target) {
            Ok(outcome) => outcome,
            Err(err) => {
                discard(&temp_path);
                return Err(err);
            }
        };

        if let Err(err) = fs::rename(&temp_path, path) {
            discard(&temp_path);
            return Err(err.into());
        }
        sync_parent_or_warn(path);

        info!(
            path = %path.display(),
            deleted = outcome.deleted,
            kept = outcome.kept,
            "compacted store"
        );
        Ok(outcome)
    }
}

fn write_replacement<R: BufRead, S: TempSink>(
    source: R,
    mut sink: S,
    target: &DeleteTarget,
) -> StoreResult<DeleteOutcome> {
    let outcome = rewrite(source, &mut sink, target)?;
    sink.finish()?;
    Ok(outcome)
}

fn copy_permissions(source: &File, temp: &File) -> io::Result<()> {
    temp.set_permissions(source.metadata()?.permissions())
}

fn discard(temp_path: &Path) {
    if let Err(err) = fs::remove_file(temp_path) {
        warn!(temp = %temp_path.display(), %err, "failed to remove temp file");
    }
}

/// Syncs the directory holding `path` so the rename is durable.
#[cfg(unix)]
fn sync_parent(path: &Path) -> StoreResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> StoreResult<()> {
    Ok(())
}

/// Runs after the rename, when the delete is already committed.
fn sync_parent_or_warn(path: &Path) {
    if let Err(err) = sync_parent(path) {
        warn!(path = %path.display(), %err, "failed to sync store directory");
    }
}
