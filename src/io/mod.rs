//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, output serialization)
//! - `snapshot` - Snapshot loading from CSV files into a memory store

pub mod csv_format;
pub mod snapshot;

pub use csv_format::{
    convert_badge, convert_student, convert_transaction, write_badges_csv,
    write_class_leaderboard_csv, write_monthly_csv, write_student_leaderboard_csv,
    write_summary_csv, CsvBadge, CsvStudent, CsvTransaction,
};
pub use snapshot::load_snapshot;
