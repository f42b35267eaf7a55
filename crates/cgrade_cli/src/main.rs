//! cgrade CLI
//!
//! A lightweight tool to manage school grades.
//!
//! # Commands
//!
//! - `init` - Create the grade file
//! - `add` - Add a new grade
//! - `status` - Show grades and averages
//! - `rm` - Remove a grade

mod commands;
mod error;

use cgrade_store::{GradeStore, StoreConfig, DEFAULT_STORE_PATH};
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// A lightweight tool to manage school grades.
#[derive(Parser, Debug)]
#[command(name = "cgrade")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the csv file that contains the grades
    #[arg(global = true, long, default_value = DEFAULT_STORE_PATH)]
    csv: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the grade file
    Init,

    /// Add a new grade
    #[command(after_help = "Examples:\n  cgrade add math 5.2\n  cgrade add math 5.5 \"second exam\"")]
    Add {
        /// Subject the grade belongs to
        subject: String,

        /// The grade, e.g. 5.25
        #[arg(value_parser = commands::add::parse_grade)]
        grade: f64,

        /// Optional comment
        comment: Option<String>,
    },

    /// Show grades and averages
    Status {
        /// Only show this subject
        subject: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Remove a grade
    #[command(after_help = "Examples:\n  cgrade rm algd2 5.25      remove the first 5.25 in algd2\n  cgrade rm algd2 5.25 2    remove the second one\n  cgrade rm --last          remove the most recently added grade")]
    Rm {
        /// Subject of the grade to remove
        #[arg(required_unless_present = "last")]
        subject: Option<String>,

        /// Grade to remove
        #[arg(required_unless_present = "last", value_parser = commands::rm::parse_stored_grade)]
        grade: Option<f64>,

        /// Which matching grade to remove, counting from 1
        #[arg(default_value_t = 1)]
        occurrence: usize,

        /// Remove the most recently added grade instead
        #[arg(long, conflicts_with_all = ["subject", "grade"])]
        last: bool,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    debug!(csv = %cli.csv.display(), command = ?cli.command, "running command");
    let store = GradeStore::new(StoreConfig::new(cli.csv));

    match cli.command {
        Commands::Init => commands::init::run(&store),
        Commands::Add {
            subject,
            grade,
            comment,
        } => commands::add::run(&store, subject, grade, comment),
        Commands::Status { subject, format } => {
            commands::status::run(&store, subject.as_deref(), &format)
        }
        Commands::Rm {
            subject,
            grade,
            occurrence,
            last,
        } => match (last, subject, grade) {
            (false, Some(subject), Some(grade)) => {
                commands::rm::run(&store, &subject, grade, occurrence)
            }
            _ => commands::rm::run_last(&store),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
