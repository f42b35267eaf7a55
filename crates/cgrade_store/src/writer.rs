//! Append-only record writer.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::init;
use crate::record::Record;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// Appends one record to the end of the store.
///
/// The encoded line is written with a single `write_all` on a file opened in
/// append mode. There is no locking.
///
/// # Errors
///
/// - [`StoreError::InvalidRecord`] if the record cannot be encoded safely
/// - [`StoreError::NotFound`] if the store does not exist and
///   `create_if_missing` is off
/// - [`StoreError::Io`] if the write fails
pub fn append(config: &StoreConfig, record: &Record) -> StoreResult<()> {
    record.validate()?;

    let path = config.path();
    if config.create_if_missing && !init::exists(path) {
        init::initialize(config)?;
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| StoreError::from_open(e, path))?;

    file.write_all(record.encode().as_bytes())?;
    if config.sync_on_write {
        file.sync_data()?;
    }

    debug!(
        path = %path.display(),
        subject = %record.subject,
        grade = record.grade,
        "appended record"
    );
    Ok(())
}
