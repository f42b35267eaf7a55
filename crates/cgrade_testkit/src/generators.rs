//! Property-based test generators using proptest.
//!
//! All generated records are free of the delimiter and line breaks, so they
//! can be stored without corrupting the file.

use cgrade_store::Record;
use proptest::prelude::*;

/// Strategy for subjects: non-empty, no delimiter, no line breaks.
pub fn subject_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_ äöü-]{1,16}").expect("Invalid regex")
}

/// Strategy for comments, possibly empty.
pub fn comment_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^;\r\n]{0,24}").expect("Invalid regex")
}

/// Strategy for finite grades.
///
/// Mostly values on the hundredths scale in `(0, 6]`, with arbitrary normal
/// floats mixed in.
pub fn grade_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (1u32..=600).prop_map(|n| f64::from(n) / 100.0),
        1 => prop::num::f64::NORMAL,
    ]
}

/// Strategy for storable records.
pub fn record_strategy() -> impl Strategy<Value = Record> {
    (subject_strategy(), grade_strategy(), comment_strategy())
        .prop_map(|(subject, grade, comment)| Record::new(subject, grade).with_comment(comment))
}

/// Strategy for records drawn from a small pool of subjects and grades, so
/// duplicates of a `(subject, grade)` pair are common.
pub fn clustered_records_strategy(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
    let record = (
        prop::sample::select(vec!["math", "algd2", "phys"]),
        prop::sample::select(vec![4.0, 5.2, 6.0]),
        comment_strategy(),
    )
        .prop_map(|(subject, grade, comment)| Record::new(subject, grade).with_comment(comment));
    prop::collection::vec(record, 0..max_len)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests, e.g. ones that touch the disk.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
