//! Add command implementation.

use crate::error::CliError;
use cgrade_store::{GradeStore, Record};

/// Parses a grade given on the command line.
///
/// Anything that is not a finite number, and exactly `0`, is rejected.
pub fn parse_grade(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(grade) if grade.is_finite() && grade != 0.0 => Ok(grade),
        _ => Err(format!("invalid grade '{s}'")),
    }
}

/// Runs the add command.
pub fn run(
    store: &GradeStore,
    subject: String,
    grade: f64,
    comment: Option<String>,
) -> Result<(), CliError> {
    let record = Record::new(subject, grade).with_comment(comment.unwrap_or_default());
    store.append(&record)?;
    println!("Added {} {}", record.subject, record.grade);
    Ok(())
}
