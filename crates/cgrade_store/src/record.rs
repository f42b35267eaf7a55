//! Grade record and its line codec.
//!
//! ## Line format
//!
//! ```text
//! subject;grade;comment\n
//! ```
//!
//! - `grade` is written as the shortest decimal text that parses back to the
//!   same `f64` (`5.25`, `4`)
//! - `comment` may be empty, leaving a trailing delimiter
//! - no quoting or escaping: fields must not contain `;` or a line break

use crate::error::{StoreError, StoreResult};
use serde::Serialize;

/// Field separator.
pub const DELIMITER: char = ';';

/// First line of every store file. Not a record.
pub const HEADER: &str = "subject;grade;comment";

/// One grade entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Subject the grade belongs to.
    pub subject: String,
    /// The grade itself.
    pub grade: f64,
    /// Free-form comment, possibly empty.
    pub comment: String,
}

impl Record {
    /// Creates a record with an empty comment.
    pub fn new(subject: impl Into<String>, grade: f64) -> Self {
        Self {
            subject: subject.into(),
            grade,
            comment: String::new(),
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Returns `true` if this record is addressed by `(subject, grade)`.
    #[must_use]
    pub fn matches(&self, subject: &str, grade: f64) -> bool {
        self.subject == subject && self.grade == grade
    }

    /// Encodes the record as one newline-terminated line.
    ///
    /// This does not check field contents; see [`Record::validate`].
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}\n",
            self.subject, self.grade, self.comment
        )
    }

    /// Decodes a single line. `line_no` is only used for error reporting.
    ///
    /// A trailing `\n` (or `\r\n`) is ignored. The comment runs to the end of
    /// the line.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedRecord`] if the line has fewer than three
    /// fields, the subject is empty, or the grade is not a finite number.
    pub fn decode(line: &str, line_no: usize) -> StoreResult<Self> {
        let line = strip_terminator(line);
        let mut fields = line.splitn(3, DELIMITER);

        let (Some(subject), Some(grade), Some(comment)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(StoreError::malformed(line_no, "expected 3 fields"));
        };

        if subject.is_empty() {
            return Err(StoreError::malformed(line_no, "empty subject"));
        }

        let grade = grade
            .parse::<f64>()
            .ok()
            .filter(|g| g.is_finite())
            .ok_or_else(|| {
                StoreError::malformed(line_no, format!("grade '{grade}' is not a number"))
            })?;

        Ok(Self {
            subject: subject.to_string(),
            grade,
            comment: comment.to_string(),
        })
    }

    /// Checks that the record can be encoded without corrupting the file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] if the subject is empty, a field
    /// contains the delimiter or a line break, or the grade is not finite.
    pub fn validate(&self) -> StoreResult<()> {
        if self.subject.is_empty() {
            return Err(StoreError::invalid_record("subject must not be empty"));
        }
        check_field("subject", &self.subject)?;
        check_field("comment", &self.comment)?;
        if !self.grade.is_finite() {
            return Err(StoreError::invalid_record(format!(
                "grade {} is not a finite number",
                self.grade
            )));
        }
        Ok(())
    }
}

fn check_field(name: &str, value: &str) -> StoreResult<()> {
    if value.contains([DELIMITER, '\n', '\r']) {
        return Err(StoreError::invalid_record(format!(
            "{name} '{}' contains '{DELIMITER}' or a line break",
            value.escape_debug()
        )));
    }
    Ok(())
}

/// Strips one trailing `\n` or `\r\n`.
pub(crate) fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_formats_line() {
        let record = Record::new("algd2", 5.25).with_comment("test 1");
        assert_eq!(record.encode(), "algd2;5.25;test 1\n");
    }

    #[test]
    fn encode_empty_comment_keeps_trailing_delimiter() {
        assert_eq!(Record::new("math", 4.0).encode(), "math;4;\n");
    }

    #[test]
    fn decode_parses_fields() {
        let record = Record::decode("algd2;5.25;test 1\n", 2).unwrap();
        assert_eq!(record, Record::new("algd2", 5.25).with_comment("test 1"));
    }

    #[test]
    fn decode_comment_runs_to_end_of_line() {
        let record = Record::decode("math;5;first; then second", 2).unwrap();
        assert_eq!(record.comment, "first; then second");
    }

    #[test]
    fn decode_accepts_crlf() {
        let record = Record::decode("math;5.5;exam\r\n", 2).unwrap();
        assert_eq!(record.comment, "exam");
    }

    #[test]
    fn decode_rejects_missing_fields() {
        let err = Record::decode("math;5.5\n", 7).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { line: 7, .. }));
    }

    #[test]
    fn decode_rejects_unparseable_grade() {
        let err = Record::decode("math;five;\n", 4).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { line: 4, .. }));
    }

    #[test]
    fn decode_rejects_non_finite_grade() {
        assert!(Record::decode("math;NaN;\n", 2).is_err());
        assert!(Record::decode("math;inf;\n", 2).is_err());
    }

    #[test]
    fn decode_rejects_empty_subject() {
        let err = Record::decode(";5;\n", 2).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { .. }));
    }

    #[test]
    fn matches_is_exact() {
        let record = Record::new("Math", 5.2);
        assert!(record.matches("Math", 5.2));
        assert!(!record.matches("math", 5.2));
        assert!(!record.matches("Math", 5.25));
    }

    #[test]
    fn validate_rejects_delimiter_and_newlines() {
        assert!(Record::new("a;b", 5.0).validate().is_err());
        assert!(Record::new("math", 5.0)
            .with_comment("line\nbreak")
            .validate()
            .is_err());
        assert!(Record::new("math", 5.0)
            .with_comment("carriage\r")
            .validate()
            .is_err());
    }

    #[test]
    fn validate_rejects_empty_subject_and_nan() {
        assert!(matches!(
            Record::new("", 5.0).validate(),
            Err(StoreError::InvalidRecord { .. })
        ));
        assert!(Record::new("math", f64::NAN).validate().is_err());
        assert!(Record::new("math", f64::INFINITY).validate().is_err());
    }

    #[test]
    fn validate_accepts_plain_record() {
        assert!(Record::new("algd2", 5.25)
            .with_comment("test 1")
            .validate()
            .is_ok());
    }
}
