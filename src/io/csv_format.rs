//! CSV format handling for snapshot rows and query output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for deserialization
//! - Conversion from rows to domain types, with validation
//! - Output serialization for leaderboards, badges, and reports
//!
//! All functions are pure (no I/O) for easy testing. Enum tokens,
//! amounts, and dates are validated here; a row that fails conversion
//! is rejected with a message, and nothing stringly typed leaves this
//! module.

use crate::core::{MonthlyReport, RankedClass, RankedStudent, ReportSummary};
use crate::types::{
    BadgeAward, ClassId, Student, StudentId, StudentStatus, Transaction, TransactionId,
    TransactionKind, VerificationStatus,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Student row structure for deserialization
///
/// Matches the students CSV with columns: id, name, class_id, status.
/// The status field stays a string until validated.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvStudent {
    pub id: StudentId,
    pub name: String,
    pub class_id: ClassId,
    pub status: String,
}

/// Transaction row structure for deserialization
///
/// Matches the transactions CSV with columns: id, student_id, date,
/// amount, kind, status, rejection_note. Amount, date, and the two
/// enum tokens stay strings until validated.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvTransaction {
    pub id: TransactionId,
    pub student_id: StudentId,
    pub date: String,
    pub amount: String,
    pub kind: String,
    pub status: String,
    pub rejection_note: Option<String>,
}

/// Badge row structure for deserialization
///
/// Matches the badges CSV with columns: student_id, name, awarded_at.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvBadge {
    pub student_id: StudentId,
    pub name: String,
    pub awarded_at: String,
}

/// Convert a CsvStudent to a Student
///
/// Validates the status token (case-insensitive) against the three
/// known enrollment states.
///
/// # Returns
///
/// Result containing either:
/// - Ok(Student) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_student(row: CsvStudent) -> Result<Student, String> {
    let status = match row.status.to_lowercase().as_str() {
        "active" => StudentStatus::Active,
        "graduated" => StudentStatus::Graduated,
        "inactive" => StudentStatus::Inactive,
        _ => {
            return Err(format!(
                "Invalid student status '{}' for student {}",
                row.status, row.id
            ))
        }
    };

    Ok(Student {
        id: row.id,
        name: row.name,
        class_id: row.class_id,
        status,
    })
}

/// Convert a CsvTransaction to a Transaction
///
/// This function:
/// - Parses the kind and status tokens (case-insensitive)
/// - Parses the amount into a Decimal and requires it to be positive
/// - Parses the date as RFC 3339
/// - Normalizes an empty rejection note to None
///
/// # Returns
///
/// Result containing either:
/// - Ok(Transaction) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_transaction(row: CsvTransaction) -> Result<Transaction, String> {
    let kind = match row.kind.to_lowercase().as_str() {
        "deposit" => TransactionKind::Deposit,
        "withdrawal" => TransactionKind::Withdrawal,
        _ => {
            return Err(format!(
                "Invalid transaction kind '{}' for transaction {}",
                row.kind, row.id
            ))
        }
    };

    let status = match row.status.to_lowercase().as_str() {
        "pending" => VerificationStatus::Pending,
        "verified" => VerificationStatus::Verified,
        "rejected" => VerificationStatus::Rejected,
        _ => {
            return Err(format!(
                "Invalid verification status '{}' for transaction {}",
                row.status, row.id
            ))
        }
    };

    let amount = Decimal::from_str(row.amount.trim())
        .map_err(|_| format!("Invalid amount '{}' for transaction {}", row.amount, row.id))?;
    if amount <= Decimal::ZERO {
        return Err(format!(
            "Amount must be positive, got '{}' for transaction {}",
            row.amount, row.id
        ));
    }

    let date = parse_date(&row.date)
        .map_err(|_| format!("Invalid date '{}' for transaction {}", row.date, row.id))?;

    let rejection_note = row
        .rejection_note
        .filter(|note| !note.trim().is_empty());

    Ok(Transaction {
        id: row.id,
        student_id: row.student_id,
        date,
        amount,
        kind,
        status,
        rejection_note,
    })
}

/// Convert a CsvBadge to a BadgeAward
pub fn convert_badge(row: CsvBadge) -> Result<BadgeAward, String> {
    let awarded_at = parse_date(&row.awarded_at).map_err(|_| {
        format!(
            "Invalid award date '{}' for student {}",
            row.awarded_at, row.student_id
        )
    })?;

    Ok(BadgeAward {
        student_id: row.student_id,
        name: row.name,
        awarded_at,
    })
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim()).map(|date| date.with_timezone(&Utc))
}

/// Write the student leaderboard to CSV format
///
/// Columns: rank, student_id, name, class_name, net_balance,
/// deposit_count. Entries are written in ranking order; balances are
/// formatted with 2 fractional digits.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_student_leaderboard_csv(
    entries: &[RankedStudent],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record([
            "rank",
            "student_id",
            "name",
            "class_name",
            "net_balance",
            "deposit_count",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for entry in entries {
        writer
            .write_record(&[
                entry.rank.to_string(),
                entry.student_id.to_string(),
                entry.name.clone(),
                entry.class_name.clone(),
                format!("{:.2}", entry.net_balance),
                entry.deposit_count.to_string(),
            ])
            .map_err(|e| format!("Failed to write leaderboard record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write the class leaderboard to CSV format
///
/// Columns: rank, class_id, name, level, total_transactions,
/// active_student_count.
pub fn write_class_leaderboard_csv(
    entries: &[RankedClass],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record([
            "rank",
            "class_id",
            "name",
            "level",
            "total_transactions",
            "active_student_count",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for entry in entries {
        writer
            .write_record(&[
                entry.rank.to_string(),
                entry.class_id.to_string(),
                entry.name.clone(),
                entry.level.clone(),
                entry.total_transactions.to_string(),
                entry.active_student_count.to_string(),
            ])
            .map_err(|e| format!("Failed to write leaderboard record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write badge awards to CSV format
///
/// Columns: student_id, name, awarded_at (RFC 3339).
pub fn write_badges_csv(awards: &[BadgeAward], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["student_id", "name", "awarded_at"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for award in awards {
        writer
            .write_record(&[
                award.student_id.to_string(),
                award.name.clone(),
                award.awarded_at.to_rfc3339(),
            ])
            .map_err(|e| format!("Failed to write badge record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write a report summary as a single-row CSV
pub fn write_summary_csv(summary: &ReportSummary, output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record([
            "total_transactions",
            "total_deposited",
            "total_withdrawn",
            "active_student_count",
            "average_net_savings",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    writer
        .write_record(&[
            summary.total_transactions.to_string(),
            format!("{:.2}", summary.total_deposited),
            format!("{:.2}", summary.total_withdrawn),
            summary.active_student_count.to_string(),
            format!("{:.2}", summary.average_net_savings),
        ])
        .map_err(|e| format!("Failed to write summary record: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write the monthly breakdown to CSV format
///
/// Columns: month, year, total_transactions, total_deposited,
/// total_withdrawn. One row per month with activity.
pub fn write_monthly_csv(months: &[MonthlyReport], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record([
            "month",
            "year",
            "total_transactions",
            "total_deposited",
            "total_withdrawn",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for month in months {
        writer
            .write_record(&[
                month.month.to_string(),
                month.year.to_string(),
                month.total_transactions.to_string(),
                format!("{:.2}", month.total_deposited),
                format!("{:.2}", month.total_withdrawn),
            ])
            .map_err(|e| format!("Failed to write monthly record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
