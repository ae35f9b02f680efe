use crate::types::{ClassId, StudentId};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rank school savings activity and award badges
#[derive(Parser, Debug)]
#[command(name = "savings-engine")]
#[command(about = "Rank school savings activity and award badges", long_about = None)]
pub struct CliArgs {
    /// Students CSV file path
    #[arg(
        long = "students",
        value_name = "PATH",
        help = "Path to the students CSV file"
    )]
    pub students_file: PathBuf,

    /// Classes CSV file path
    #[arg(
        long = "classes",
        value_name = "PATH",
        help = "Path to the classes CSV file"
    )]
    pub classes_file: PathBuf,

    /// Transactions CSV file path
    #[arg(
        long = "transactions",
        value_name = "PATH",
        help = "Path to the transactions CSV file"
    )]
    pub transactions_file: PathBuf,

    /// Badge awards CSV file path (optional)
    #[arg(
        long = "badges",
        value_name = "PATH",
        help = "Path to the badge awards CSV file (optional)"
    )]
    pub badges_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available queries over the loaded snapshot
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the student leaderboard as CSV
    StudentLeaderboard {
        /// Maximum number of entries (default: 10)
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Print the class leaderboard as CSV
    ClassLeaderboard {
        /// Maximum number of entries (default: 10)
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Print a student's net verified balance
    Balance {
        /// Student id
        #[arg(value_name = "STUDENT_ID")]
        student: StudentId,
    },

    /// Print a student's leaderboard rank (0 if unranked)
    StudentRank {
        /// Student id
        #[arg(value_name = "STUDENT_ID")]
        student: StudentId,
    },

    /// Print a class's leaderboard rank (0 if unranked)
    ClassRank {
        /// Class id
        #[arg(value_name = "CLASS_ID")]
        class: ClassId,
    },

    /// Evaluate badge rules for a student and print new awards as CSV
    Badges {
        /// Student id
        #[arg(value_name = "STUDENT_ID")]
        student: StudentId,
    },

    /// Print a savings report summary as CSV
    Summary {
        /// Start of the reporting range (inclusive), RFC 3339
        #[arg(long, value_name = "DATE", value_parser = parse_cli_date)]
        start: Option<DateTime<Utc>>,

        /// End of the reporting range (inclusive), RFC 3339
        #[arg(long, value_name = "DATE", value_parser = parse_cli_date)]
        end: Option<DateTime<Utc>>,

        /// Restrict the report to one class
        #[arg(long, value_name = "CLASS_ID")]
        class: Option<ClassId>,
    },

    /// Print a per-month breakdown for a year as CSV
    Monthly {
        /// Calendar year to report on
        #[arg(value_name = "YEAR")]
        year: i32,

        /// Restrict the report to one class
        #[arg(long, value_name = "CLASS_ID")]
        class: Option<ClassId>,
    },
}

/// Parse an RFC 3339 timestamp from the command line
fn parse_cli_date(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}
