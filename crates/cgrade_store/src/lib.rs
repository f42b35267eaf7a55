//! # cgrade store
//!
//! Record store engine for cgrade grade files.
//!
//! A store is a UTF-8 text file with one header line followed by one record
//! per line:
//!
//! ```text
//! subject;grade;comment
//! algd2;5.25;test 1
//! math;4.5;
//! ```
//!
//! ## Components
//!
//! - [`Record`] - one grade entry and its line codec
//! - [`RecordReader`] - streaming, optionally subject-filtered reads
//! - [`Compactor`] - deletes by rewriting into a temp file and renaming it
//!   over the original
//! - [`GradeStore`] - facade tying the operations to a [`StoreConfig`]
//!
//! Record identity is positional. A delete addresses the n-th record sharing
//! a `(subject, grade)` pair; there is no stored key.
//!
//! There is no locking. Concurrent invocations against one file are not
//! supported.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod compactor;
mod config;
mod error;
mod init;
mod reader;
mod record;
mod store;
mod summary;
mod writer;

pub use compactor::{rewrite, Compactor, DeleteOutcome, DeleteTarget, TempSink};
pub use config::{StoreConfig, DEFAULT_STORE_PATH};
pub use error::{StoreError, StoreResult};
pub use init::{exists, initialize};
pub use reader::RecordReader;
pub use record::{Record, DELIMITER, HEADER};
pub use store::{GradeStore, Records};
pub use summary::{average, SubjectSummary, Summary};
pub use writer::append;
