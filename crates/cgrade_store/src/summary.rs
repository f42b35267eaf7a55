//! Aggregates over records.

use crate::error::{StoreError, StoreResult};
use crate::record::Record;
use serde::Serialize;

/// Returns the arithmetic mean of the grades.
///
/// # Errors
///
/// Returns [`StoreError::EmptyStore`] if `records` is empty.
pub fn average(records: &[Record]) -> StoreResult<f64> {
    if records.is_empty() {
        return Err(StoreError::EmptyStore);
    }
    let total: f64 = records.iter().map(|r| r.grade).sum();
    Ok(total / records.len() as f64)
}

/// Grades and average of one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    /// The subject.
    pub subject: String,
    /// Grades in insertion order.
    pub grades: Vec<f64>,
    /// Mean of `grades`.
    pub average: f64,
}

/// Status of a store or of a single subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Records the summary was computed from, in insertion order.
    pub records: Vec<Record>,
    /// Mean over all `records`.
    pub average: f64,
    /// Per-subject breakdown in order of first appearance.
    pub subjects: Vec<SubjectSummary>,
}

impl Summary {
    /// Builds a summary from a list of records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyStore`] if `records` is empty.
    pub fn from_records(records: Vec<Record>) -> StoreResult<Self> {
        let average = average(&records)?;

        let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
        for record in &records {
            match groups.iter_mut().find(|(subject, _)| *subject == record.subject) {
                Some((_, grades)) => grades.push(record.grade),
                None => groups.push((record.subject.clone(), vec![record.grade])),
            }
        }

        let subjects = groups
            .into_iter()
            .map(|(subject, grades)| {
                let average = grades.iter().sum::<f64>() / grades.len() as f64;
                SubjectSummary {
                    subject,
                    grades,
                    average,
                }
            })
            .collect();

        Ok(Self {
            records,
            average,
            subjects,
        })
    }

    /// Returns the grades of all records in insertion order.
    #[must_use]
    pub fn grades(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.grade).collect()
    }
}
