//! Core traits for storage access
//!
//! This module defines the storage abstraction the engine reads
//! snapshots through. The engine never holds a global handle; a store
//! value is injected at construction and every query goes through it.

use crate::types::{BadgeAward, EngineError, SchoolClass, Student, StudentId, Transaction};

/// Outcome of a badge award attempt
///
/// Awards are unique per (student, badge name) in the storage layer. A
/// `Duplicate` outcome means the uniqueness constraint already held,
/// which the evaluator treats as a benign no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum AwardOutcome {
    /// The badge was newly recorded
    Awarded(BadgeAward),

    /// The (student, badge name) pair was already recorded
    Duplicate,
}

/// Trait for reading savings data and persisting badge awards
///
/// Provides the snapshot reads the engine aggregates over plus the one
/// write path, badge persistence. Implementations must return listings
/// ordered by id so downstream output is deterministic.
pub trait SavingsStore {
    /// Get all students with active status
    fn list_active_students(&self) -> Result<Vec<Student>, EngineError>;

    /// Get all students regardless of enrollment status
    ///
    /// Report queries need graduated/inactive students' transactions to
    /// resolve class membership, so this is wider than the leaderboard
    /// read path.
    fn list_students(&self) -> Result<Vec<Student>, EngineError>;

    /// Get all classes
    fn list_classes(&self) -> Result<Vec<SchoolClass>, EngineError>;

    /// Get verified transactions, optionally restricted to one student
    fn list_verified_transactions(
        &self,
        student: Option<StudentId>,
    ) -> Result<Vec<Transaction>, EngineError>;

    /// Get transactions of every verification status, optionally
    /// restricted to one student
    ///
    /// Report totals span pending and rejected rows, so this read
    /// bypasses the verified filter.
    fn list_transactions(
        &self,
        student: Option<StudentId>,
    ) -> Result<Vec<Transaction>, EngineError>;

    /// Get the badge names already awarded to a student
    ///
    /// Returns `StudentNotFound` when no such student exists; badge
    /// evaluation refuses to run for a missing student.
    fn list_awarded_badge_names(&self, student: StudentId) -> Result<Vec<String>, EngineError>;

    /// Record a badge award for a student
    ///
    /// The (student, badge name) pair is unique in storage. When the
    /// pair already exists the store reports `AwardOutcome::Duplicate`
    /// instead of an error. Returns `StudentNotFound` when no such
    /// student exists.
    fn award_badge(&mut self, student: StudentId, name: &str) -> Result<AwardOutcome, EngineError>;
}
