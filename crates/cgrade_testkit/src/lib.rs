//! # cgrade testkit
//!
//! Test utilities for the cgrade record store.
//!
//! This crate provides:
//! - Temporary store fixtures
//! - Property-based record generators using proptest
//! - Fault-injecting temp sinks for crash-safety tests
//!
//! ## Usage
//!
//! ```rust
//! use cgrade_testkit::prelude::*;
//!
//! let store = TestStore::with_records(&sample_records());
//! assert_eq!(store.list(None).unwrap().len(), 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod crash;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::crash::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use crash::*;
pub use fixtures::*;
pub use generators::*;
