//! Rm command implementation.

use crate::error::CliError;
use cgrade_store::{GradeStore, Record};

/// Parses the grade of the record to remove. Any finite number is accepted.
pub fn parse_stored_grade(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(grade) if grade.is_finite() => Ok(grade),
        _ => Err(format!("invalid grade '{s}'")),
    }
}

/// Runs the rm command for the `occurrence`-th `(subject, grade)` match.
pub fn run(
    store: &GradeStore,
    subject: &str,
    grade: f64,
    occurrence: usize,
) -> Result<(), CliError> {
    let outcome = store.delete(subject, grade, occurrence)?;
    match outcome.removed {
        Some(record) => println!("Removed {}", describe(&record)),
        None => println!("No grade {grade} #{occurrence} found for {subject}"),
    }
    Ok(())
}

/// Runs `rm --last`.
pub fn run_last(store: &GradeStore) -> Result<(), CliError> {
    match store.delete_latest()? {
        Some(record) => println!("Removed {}", describe(&record)),
        None => println!("No grades to remove"),
    }
    Ok(())
}

fn describe(record: &Record) -> String {
    if record.comment.is_empty() {
        format!("{} {}", record.subject, record.grade)
    } else {
        format!("{} {} ({})", record.subject, record.grade, record.comment)
    }
}
