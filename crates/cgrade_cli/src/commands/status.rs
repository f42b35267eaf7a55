//! Status command implementation.

use crate::error::CliError;
use cgrade_store::{GradeStore, Summary};
use serde::Serialize;

/// Status output in JSON form.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    subject: Option<&'a str>,
    #[serde(flatten)]
    summary: &'a Summary,
}

/// Runs the status command.
pub fn run(store: &GradeStore, subject: Option<&str>, format: &str) -> Result<(), CliError> {
    if !matches!(format, "text" | "json") {
        return Err(CliError::UnknownFormat(format.to_string()));
    }

    let summary = store.summarize(subject)?;
    let output = if format == "json" {
        serde_json::to_string_pretty(&StatusReport {
            subject,
            summary: &summary,
        })?
    } else {
        render_text(subject, &summary)
    };

    println!("{output}");
    Ok(())
}

fn join_grades(grades: &[f64]) -> String {
    grades
        .iter()
        .map(|g| format!("{g:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_text(subject: Option<&str>, summary: &Summary) -> String {
    let mut lines = vec![
        match subject {
            Some(subject) => format!("Stats for {subject}"),
            None => "Stats".to_string(),
        },
        format!("Grades: {}", join_grades(&summary.grades())),
        format!("Avg: {:.2}", summary.average),
    ];

    // With a subject filter the breakdown would repeat the lines above.
    if subject.is_none() {
        lines.push(String::new());
        lines.extend(summary.subjects.iter().map(|entry| {
            format!(
                "{}: {} (avg {:.2})",
                entry.subject,
                join_grades(&entry.grades),
                entry.average
            )
        }));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgrade_store::Record;

    fn summary() -> Summary {
        Summary::from_records(vec![
            Record::new("algd2", 5.25),
            Record::new("math", 4.5),
            Record::new("algd2", 5.75),
        ])
        .unwrap()
    }

    #[test]
    fn text_for_one_subject() {
        let summary = Summary::from_records(vec![
            Record::new("algd2", 5.2),
            Record::new("algd2", 4.0),
        ])
        .unwrap();

        assert_eq!(
            render_text(Some("algd2"), &summary),
            "Stats for algd2\nGrades: 5.20, 4.00\nAvg: 4.60"
        );
    }

    #[test]
    fn text_for_all_subjects_has_breakdown() {
        assert_eq!(
            render_text(None, &summary()),
            "Stats\n\
             Grades: 5.25, 4.50, 5.75\n\
             Avg: 5.17\n\
             \n\
             algd2: 5.25, 5.75 (avg 5.50)\n\
             math: 4.50 (avg 4.50)"
        );
    }

    #[test]
    fn json_flattens_summary() {
        let summary = summary();
        let json = serde_json::to_value(StatusReport {
            subject: None,
            summary: &summary,
        })
        .unwrap();

        assert!(json["subject"].is_null());
        assert_eq!(json["subjects"][0]["average"], 5.5);
        assert_eq!(json["records"].as_array().unwrap().len(), 3);
        assert_eq!(json["subjects"][1]["subject"], "math");
    }

    #[test]
    fn unknown_format_is_rejected_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let store = GradeStore::at(dir.path().join("missing.csv"));

        let err = run(&store, None, "xml").unwrap_err();
        assert!(matches!(err, CliError::UnknownFormat(_)));
    }

    #[test]
    fn empty_store_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = GradeStore::at(dir.path().join("cgrade.csv"));
        store.initialize().unwrap();

        let err = run(&store, None, "text").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
