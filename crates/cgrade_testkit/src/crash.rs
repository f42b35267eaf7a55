//! Crash-safety testing for store compaction.
//!
//! A delete writes the whole store into a temp file before replacing the
//! original. [`CrashingSink`] wraps that temp file and fails at a chosen
//! point, so tests can check that the original survives intact.
//!
//! ## Usage
//!
//! ```rust
//! use cgrade_store::DeleteTarget;
//! use cgrade_testkit::prelude::*;
//!
//! let store = TestStore::with_records(&sample_records());
//! let before = store.bytes();
//!
//! let result = delete_with_crash(
//!     &store,
//!     &DeleteTarget::occurrence("math", 5.2, 1),
//!     CrashPoint::AfterBytes(30),
//! );
//!
//! assert!(result.is_err());
//! assert_eq!(store.bytes(), before);
//! ```

use cgrade_store::{Compactor, DeleteOutcome, DeleteTarget, GradeStore, StoreResult, TempSink};
use std::io::{self, BufWriter, Write};

/// Points at which a temp file write can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashPoint {
    /// Never fail.
    Never,
    /// Fail once this many bytes have been written. The write that crosses
    /// the limit is applied partially.
    AfterBytes(usize),
    /// Accept every write but fail in `finish`.
    DuringFinish,
}

/// A [`TempSink`] wrapper that can simulate crashes.
#[derive(Debug)]
pub struct CrashingSink<S> {
    inner: S,
    point: CrashPoint,
    bytes_written: usize,
    crashed: bool,
}

impl<S: TempSink> CrashingSink<S> {
    /// Creates a sink that fails at `point`.
    pub fn new(inner: S, point: CrashPoint) -> Self {
        Self {
            inner,
            point,
            bytes_written: 0,
            crashed: false,
        }
    }

    /// Returns the number of bytes passed through to the inner sink.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Returns whether the sink has crashed.
    pub fn has_crashed(&self) -> bool {
        self.crashed
    }

    fn crash(&mut self, message: &str) -> io::Error {
        self.crashed = true;
        io::Error::new(io::ErrorKind::Other, message.to_string())
    }
}

impl<S: TempSink> Write for CrashingSink<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.crashed {
            return Err(self.crash("simulated crash during write"));
        }

        if let CrashPoint::AfterBytes(limit) = self.point {
            let remaining = limit.saturating_sub(self.bytes_written);
            if buf.len() > remaining {
                // Write partial data up to crash point
                if remaining > 0 {
                    self.inner.write_all(&buf[..remaining])?;
                    self.bytes_written += remaining;
                }
                return Err(self.crash("simulated crash during partial write"));
            }
        }

        let written = self.inner.write(buf)?;
        self.bytes_written += written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S: TempSink> TempSink for CrashingSink<S> {
    fn finish(mut self) -> io::Result<()> {
        if self.point == CrashPoint::DuringFinish {
            return Err(self.crash("simulated crash during finish"));
        }
        self.inner.finish()
    }
}

/// Runs a delete whose temp file write fails at `point`.
///
/// # Errors
///
/// Returns the error produced by the delete, which is the simulated crash
/// unless the store itself is unusable.
pub fn delete_with_crash(
    store: &GradeStore,
    target: &DeleteTarget,
    point: CrashPoint,
) -> StoreResult<DeleteOutcome> {
    Compactor::new(store.config())
        .delete_with(target, |file| CrashingSink::new(BufWriter::new(file), point))
}
