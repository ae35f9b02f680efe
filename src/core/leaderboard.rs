//! Leaderboard ranking module
//!
//! This module turns a snapshot of students, classes, and verified
//! transactions into fully ordered rankings. Rankings are recomputed
//! from scratch on every call; there is no cached or incremental rank
//! state anywhere.
//!
//! Ordering rules:
//! - Students: deposit_count desc, net_balance desc, name asc (byte
//!   order), student id asc.
//! - Classes: total_transactions desc, active_student_count desc,
//!   name asc, class id asc.
//!
//! Ranks are 1-based positions in the sorted sequence. Ties are not
//! collapsed; equal sort keys still receive consecutive distinct ranks
//! in their resolved tie-break order.

use super::balance::tally_by_student;
use crate::types::{ClassId, EngineError, SchoolClass, Student, StudentId, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Default number of entries returned by leaderboard queries
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// One row of the student leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStudent {
    /// The ranked student's ID
    pub student_id: StudentId,

    /// Student display name
    pub name: String,

    /// Display name of the student's class; empty when the class
    /// reference cannot be resolved
    pub class_name: String,

    /// Net verified balance
    pub net_balance: Decimal,

    /// Count of verified deposits
    pub deposit_count: u32,

    /// 1-based position in the ranking
    pub rank: u32,
}

/// One row of the class leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedClass {
    /// The ranked class's ID
    pub class_id: ClassId,

    /// Class display name
    pub name: String,

    /// Class level label
    pub level: String,

    /// Count of verified transactions across the class's active
    /// students, deposits and withdrawals alike
    pub total_transactions: u32,

    /// Count of active students enrolled in the class
    pub active_student_count: u32,

    /// 1-based position in the ranking
    pub rank: u32,
}

/// Rank every active student
///
/// Returns the full ordered ranking; callers wanting a top-N truncate
/// the result. Students with zero verified transactions participate
/// with the zero tally and sort last among equals.
pub fn rank_students(
    students: &[Student],
    classes: &[SchoolClass],
    transactions: &[Transaction],
) -> Result<Vec<RankedStudent>, EngineError> {
    let class_names: HashMap<ClassId, &str> = classes
        .iter()
        .map(|class| (class.id, class.name.as_str()))
        .collect();

    let tallies = tally_by_student(transactions)?;

    let mut ranking: Vec<RankedStudent> = students
        .iter()
        .filter(|student| student.status.is_active())
        .map(|student| {
            let tally = tallies.get(&student.id).copied().unwrap_or_default();
            RankedStudent {
                student_id: student.id,
                name: student.name.clone(),
                class_name: class_names
                    .get(&student.class_id)
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                net_balance: tally.net_balance,
                deposit_count: tally.deposit_count,
                rank: 0,
            }
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.deposit_count
            .cmp(&a.deposit_count)
            .then_with(|| b.net_balance.cmp(&a.net_balance))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.student_id.cmp(&b.student_id))
    });

    for (position, entry) in ranking.iter_mut().enumerate() {
        entry.rank = (position + 1) as u32;
    }

    Ok(ranking)
}

/// Rank every class
///
/// Classes with no active students still rank, carrying zero tallies.
/// Verified transactions of inactive students do not count toward
/// their class.
pub fn rank_classes(
    classes: &[SchoolClass],
    students: &[Student],
    transactions: &[Transaction],
) -> Vec<RankedClass> {
    let mut class_of_active: HashMap<StudentId, ClassId> = HashMap::new();
    let mut active_counts: HashMap<ClassId, u32> = HashMap::new();

    for student in students.iter().filter(|student| student.status.is_active()) {
        class_of_active.insert(student.id, student.class_id);
        *active_counts.entry(student.class_id).or_insert(0) += 1;
    }

    let mut transaction_counts: HashMap<ClassId, u32> = HashMap::new();
    for transaction in transactions.iter().filter(|tx| tx.is_verified()) {
        if let Some(&class_id) = class_of_active.get(&transaction.student_id) {
            *transaction_counts.entry(class_id).or_insert(0) += 1;
        }
    }

    let mut ranking: Vec<RankedClass> = classes
        .iter()
        .map(|class| RankedClass {
            class_id: class.id,
            name: class.name.clone(),
            level: class.level.clone(),
            total_transactions: transaction_counts.get(&class.id).copied().unwrap_or(0),
            active_student_count: active_counts.get(&class.id).copied().unwrap_or(0),
            rank: 0,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.total_transactions
            .cmp(&a.total_transactions)
            .then_with(|| b.active_student_count.cmp(&a.active_student_count))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.class_id.cmp(&b.class_id))
    });

    for (position, entry) in ranking.iter_mut().enumerate() {
        entry.rank = (position + 1) as u32;
    }

    ranking
}
