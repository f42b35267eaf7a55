//! Streaming record reader.

use crate::error::{StoreError, StoreResult};
use crate::record::{strip_terminator, Record, HEADER};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Raw line reader that tracks 1-based line numbers.
///
/// Lines are returned with their terminator so callers can copy them
/// byte for byte.
#[derive(Debug)]
pub(crate) struct Lines<R> {
    inner: R,
    line_no: usize,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, line_no: 0 }
    }

    /// Line number of the most recently returned line.
    pub(crate) fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads the next line, or `None` at end of file.
    ///
    /// A line that is not valid UTF-8 is a [`StoreError::MalformedRecord`].
    pub(crate) fn next_line(&mut self) -> StoreResult<Option<String>> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| StoreError::malformed(self.line_no, "invalid UTF-8"))
    }

    /// Reads and checks the header line, returning it verbatim.
    pub(crate) fn read_header(&mut self) -> StoreResult<String> {
        let line = self
            .next_line()?
            .ok_or_else(|| StoreError::malformed(1, "missing header"))?;
        if strip_terminator(&line) != HEADER {
            return Err(StoreError::malformed(
                1,
                format!("expected header '{HEADER}'"),
            ));
        }
        Ok(line)
    }
}

/// Returns `true` for a line with no content besides its terminator.
pub(crate) fn is_blank(line: &str) -> bool {
    strip_terminator(line).is_empty()
}

/// Forward-only iterator over the records of a store.
///
/// Yields records in insertion order, optionally restricted to one subject.
/// After the first error the iterator is exhausted.
#[derive(Debug)]
pub struct RecordReader<R> {
    lines: Lines<R>,
    subject: Option<String>,
    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Opens the store at `path` and reads past its header.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file does not exist, or
    /// [`StoreError::MalformedRecord`] if the header is wrong.
    pub fn open(path: &Path, subject: Option<&str>) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| StoreError::from_open(e, path))?;
        Self::new(BufReader::new(file), subject)
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Wraps a reader positioned at the start of a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be read or is wrong.
    pub fn new(inner: R, subject: Option<&str>) -> StoreResult<Self> {
        let mut lines = Lines::new(inner);
        lines.read_header()?;
        Ok(Self {
            lines,
            subject: subject.map(str::to_string),
            done: false,
        })
    }

    fn next_record(&mut self) -> StoreResult<Option<Record>> {
        while let Some(line) = self.lines.next_line()? {
            if is_blank(&line) {
                continue;
            }
            let record = Record::decode(&line, self.lines.line_no())?;
            match &self.subject {
                Some(subject) if record.subject != *subject => continue,
                _ => return Ok(Some(record)),
            }
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = StoreResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
