//! School Savings Engine CLI
//!
//! Command-line interface for querying school savings snapshots from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --students students.csv --classes classes.csv \
//!     --transactions transactions.csv student-leaderboard --limit 5
//! cargo run -- --students students.csv --classes classes.csv \
//!     --transactions transactions.csv balance 7
//! cargo run -- --students students.csv --classes classes.csv \
//!     --transactions transactions.csv --badges badges.csv badges 7
//! cargo run -- --students students.csv --classes classes.csv \
//!     --transactions transactions.csv summary --start 2024-09-01T00:00:00Z
//! ```
//!
//! The program loads the snapshot files into an in-memory store, runs the
//! selected query through the savings engine, and prints the result to
//! stdout. Leaderboards, badge awards, and reports print as CSV; balances
//! and ranks print as plain lines.
//!
//! Badge evaluation awards against the loaded snapshot only; the snapshot
//! files themselves are never modified.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use school_savings_engine::cli::{self, CliArgs, Command};
use school_savings_engine::core::{ReportFilter, SavingsEngine};
use school_savings_engine::io;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Load the snapshot, run the selected query, and print the result
fn run(args: CliArgs) -> Result<(), String> {
    let store = io::load_snapshot(
        &args.students_file,
        &args.classes_file,
        &args.transactions_file,
        args.badges_file.as_deref(),
    )?;
    let mut engine = SavingsEngine::new(store);

    // Output goes to stdout
    let mut output = std::io::stdout();

    match args.command {
        Command::StudentLeaderboard { limit } => {
            let entries = engine
                .student_leaderboard(limit)
                .map_err(|e| e.to_string())?;
            io::write_student_leaderboard_csv(&entries, &mut output)
        }
        Command::ClassLeaderboard { limit } => {
            let entries = engine.class_leaderboard(limit).map_err(|e| e.to_string())?;
            io::write_class_leaderboard_csv(&entries, &mut output)
        }
        Command::Balance { student } => {
            let balance = engine.net_balance(student).map_err(|e| e.to_string())?;
            println!("{:.2}", balance);
            Ok(())
        }
        Command::StudentRank { student } => {
            let rank = engine.student_rank(student).map_err(|e| e.to_string())?;
            println!("{}", rank);
            Ok(())
        }
        Command::ClassRank { class } => {
            let rank = engine.class_rank(class).map_err(|e| e.to_string())?;
            println!("{}", rank);
            Ok(())
        }
        Command::Badges { student } => {
            let awarded = engine.evaluate_badges(student).map_err(|e| e.to_string())?;
            io::write_badges_csv(&awarded, &mut output)
        }
        Command::Summary { start, end, class } => {
            let filter = ReportFilter { start, end, class };
            let summary = engine.report_summary(&filter).map_err(|e| e.to_string())?;
            io::write_summary_csv(&summary, &mut output)
        }
        Command::Monthly { year, class } => {
            let months = engine
                .monthly_report(year, class)
                .map_err(|e| e.to_string())?;
            io::write_monthly_csv(&months, &mut output)
        }
    }
}
