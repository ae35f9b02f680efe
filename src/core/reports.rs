//! Report aggregation module
//!
//! This module computes the summary and monthly savings reports as
//! in-memory aggregation over typed records. Two source-system quirks
//! are preserved on purpose:
//! - Report totals cover every transaction in range regardless of
//!   verification status, while the savings average only sees verified
//!   rows.
//! - The average divides by the number of active students with at
//!   least one verified in-range transaction, not by all active
//!   students.
//!
//! Month names and export formatting stay out of this layer; months
//! are numeric.

use crate::types::{
    ClassId, EngineError, Student, StudentId, Transaction, TransactionKind,
};
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Date-range and class bounds for report queries
///
/// `None` fields leave that dimension unbounded. Date bounds are
/// inclusive on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    /// Earliest transaction date to include
    pub start: Option<DateTime<Utc>>,

    /// Latest transaction date to include
    pub end: Option<DateTime<Utc>>,

    /// Restrict to transactions of students in this class
    pub class: Option<ClassId>,
}

impl ReportFilter {
    fn in_range(&self, date: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Aggregate savings figures over a filtered transaction set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Count of all transactions in range, every verification status
    pub total_transactions: u32,

    /// Sum of deposit amounts in range, every verification status
    pub total_deposited: Decimal,

    /// Sum of withdrawal amounts in range, every verification status
    pub total_withdrawn: Decimal,

    /// Count of active students in the filtered population
    pub active_student_count: u32,

    /// Mean verified net balance over active students with at least
    /// one verified in-range transaction
    pub average_net_savings: Decimal,
}

/// One month's aggregate in the yearly breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    /// Calendar month, 1 through 12
    pub month: u32,

    /// Calendar year of the breakdown
    pub year: i32,

    /// Count of the month's transactions, every verification status
    pub total_transactions: u32,

    /// Sum of the month's deposit amounts
    pub total_deposited: Decimal,

    /// Sum of the month's withdrawal amounts
    pub total_withdrawn: Decimal,
}

fn class_memberships(students: &[Student]) -> HashMap<StudentId, ClassId> {
    students
        .iter()
        .map(|student| (student.id, student.class_id))
        .collect()
}

/// Whether a transaction belongs to the filtered class population
///
/// With no class filter every transaction passes, resolvable student
/// or not. With a class filter the student must resolve to the class.
fn in_class(
    transaction: &Transaction,
    class: Option<ClassId>,
    memberships: &HashMap<StudentId, ClassId>,
) -> bool {
    match class {
        None => true,
        Some(class_id) => memberships.get(&transaction.student_id) == Some(&class_id),
    }
}

/// Compute the summary report over an optional date range and class
///
/// Zero matching transactions produce a zero-valued summary, never an
/// error.
pub fn summarize(
    students: &[Student],
    transactions: &[Transaction],
    filter: &ReportFilter,
) -> Result<ReportSummary, EngineError> {
    let memberships = class_memberships(students);

    let mut total_transactions = 0u32;
    let mut total_deposited = Decimal::ZERO;
    let mut total_withdrawn = Decimal::ZERO;

    for transaction in transactions {
        if !filter.in_range(transaction.date)
            || !in_class(transaction, filter.class, &memberships)
        {
            continue;
        }

        total_transactions += 1;
        match transaction.kind {
            TransactionKind::Deposit => {
                total_deposited = total_deposited.checked_add(transaction.amount).ok_or_else(
                    || EngineError::arithmetic_overflow("deposit total", transaction.student_id),
                )?;
            }
            TransactionKind::Withdrawal => {
                total_withdrawn = total_withdrawn.checked_add(transaction.amount).ok_or_else(
                    || EngineError::arithmetic_overflow("withdrawal total", transaction.student_id),
                )?;
            }
        }
    }

    let active_student_count = students
        .iter()
        .filter(|student| student.status.is_active())
        .filter(|student| filter.class.is_none_or(|class| student.class_id == class))
        .count() as u32;

    let average_net_savings = average_net_savings(students, transactions, filter, &memberships)?;

    Ok(ReportSummary {
        total_transactions,
        total_deposited,
        total_withdrawn,
        active_student_count,
        average_net_savings,
    })
}

/// Mean verified net balance over active students with at least one
/// verified in-range transaction
fn average_net_savings(
    students: &[Student],
    transactions: &[Transaction],
    filter: &ReportFilter,
    memberships: &HashMap<StudentId, ClassId>,
) -> Result<Decimal, EngineError> {
    let active: HashSet<StudentId> = students
        .iter()
        .filter(|student| student.status.is_active())
        .map(|student| student.id)
        .collect();

    let mut nets: HashMap<StudentId, Decimal> = HashMap::new();
    for transaction in transactions {
        if !transaction.is_verified()
            || !filter.in_range(transaction.date)
            || !in_class(transaction, filter.class, memberships)
            || !active.contains(&transaction.student_id)
        {
            continue;
        }

        let net = nets.entry(transaction.student_id).or_insert(Decimal::ZERO);
        *net = match transaction.kind {
            TransactionKind::Deposit => net.checked_add(transaction.amount),
            TransactionKind::Withdrawal => net.checked_sub(transaction.amount),
        }
        .ok_or_else(|| {
            EngineError::arithmetic_overflow("average net savings", transaction.student_id)
        })?;
    }

    if nets.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let mut total = Decimal::ZERO;
    for (student, net) in &nets {
        total = total
            .checked_add(*net)
            .ok_or_else(|| EngineError::arithmetic_overflow("average net savings", *student))?;
    }

    // Divisor is nonzero here.
    Ok(total / Decimal::from(nets.len() as u64))
}

/// Compute the per-month breakdown for one calendar year
///
/// Months without transactions are skipped; the result is ordered by
/// month ascending.
pub fn monthly_breakdown(
    students: &[Student],
    transactions: &[Transaction],
    year: i32,
    class: Option<ClassId>,
) -> Result<Vec<MonthlyReport>, EngineError> {
    let memberships = class_memberships(students);

    let mut months: BTreeMap<u32, MonthlyReport> = BTreeMap::new();

    for transaction in transactions {
        if transaction.date.year() != year || !in_class(transaction, class, &memberships) {
            continue;
        }

        let month = months
            .entry(transaction.date.month())
            .or_insert_with(|| MonthlyReport {
                month: transaction.date.month(),
                year,
                total_transactions: 0,
                total_deposited: Decimal::ZERO,
                total_withdrawn: Decimal::ZERO,
            });

        month.total_transactions += 1;
        match transaction.kind {
            TransactionKind::Deposit => {
                month.total_deposited =
                    month.total_deposited.checked_add(transaction.amount).ok_or_else(|| {
                        EngineError::arithmetic_overflow(
                            "monthly deposit total",
                            transaction.student_id,
                        )
                    })?;
            }
            TransactionKind::Withdrawal => {
                month.total_withdrawn =
                    month.total_withdrawn.checked_add(transaction.amount).ok_or_else(|| {
                        EngineError::arithmetic_overflow(
                            "monthly withdrawal total",
                            transaction.student_id,
                        )
                    })?;
            }
        }
    }

    Ok(months.into_values().collect())
}
