//! In-memory store module
//!
//! This module provides the `MemoryStore` struct, the reference
//! `SavingsStore` backed by plain maps and vectors. The io layer seeds
//! it from CSV snapshots; tests seed it directly.
//!
//! The MemoryStore is responsible for:
//! - Holding the student/class/transaction snapshot
//! - Serving id-ordered listings for deterministic output
//! - Enforcing the (student, badge name) uniqueness constraint on
//!   badge awards
//!
//! Referential integrity of seeded rows is the loader's job; `add_*`
//! methods insert what they are given.

use super::traits::{AwardOutcome, SavingsStore};
use crate::types::{
    BadgeAward, ClassId, EngineError, SchoolClass, Student, StudentId, Transaction,
};
use chrono::Utc;
use std::collections::HashMap;

/// HashMap/Vec-backed reference store
#[derive(Debug)]
pub struct MemoryStore {
    /// Map of student IDs to student records
    students: HashMap<StudentId, Student>,

    /// Map of class IDs to class records
    classes: HashMap<ClassId, SchoolClass>,

    /// All transaction records
    transactions: Vec<Transaction>,

    /// Badge awards, in award order
    badges: Vec<BadgeAward>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            students: HashMap::new(),
            classes: HashMap::new(),
            transactions: Vec::new(),
            badges: Vec::new(),
        }
    }

    /// Seed one student
    pub fn add_student(&mut self, student: Student) {
        self.students.insert(student.id, student);
    }

    /// Seed one class
    pub fn add_class(&mut self, class: SchoolClass) {
        self.classes.insert(class.id, class);
    }

    /// Seed one transaction
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Seed one pre-existing badge award
    pub fn add_badge(&mut self, badge: BadgeAward) {
        self.badges.push(badge);
    }

    fn sorted_students<F>(&self, keep: F) -> Vec<Student>
    where
        F: Fn(&Student) -> bool,
    {
        let mut students: Vec<Student> = self
            .students
            .values()
            .filter(|student| keep(student))
            .cloned()
            .collect();
        students.sort_by_key(|student| student.id);
        students
    }

    fn sorted_transactions<F>(&self, keep: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|transaction| keep(transaction))
            .cloned()
            .collect();
        transactions.sort_by_key(|transaction| transaction.id);
        transactions
    }
}

impl SavingsStore for MemoryStore {
    fn list_active_students(&self) -> Result<Vec<Student>, EngineError> {
        Ok(self.sorted_students(|student| student.status.is_active()))
    }

    fn list_students(&self) -> Result<Vec<Student>, EngineError> {
        Ok(self.sorted_students(|_| true))
    }

    fn list_classes(&self) -> Result<Vec<SchoolClass>, EngineError> {
        let mut classes: Vec<SchoolClass> = self.classes.values().cloned().collect();
        classes.sort_by_key(|class| class.id);
        Ok(classes)
    }

    fn list_verified_transactions(
        &self,
        student: Option<StudentId>,
    ) -> Result<Vec<Transaction>, EngineError> {
        Ok(self.sorted_transactions(|transaction| {
            transaction.is_verified()
                && student.is_none_or(|student| transaction.student_id == student)
        }))
    }

    fn list_transactions(
        &self,
        student: Option<StudentId>,
    ) -> Result<Vec<Transaction>, EngineError> {
        Ok(self.sorted_transactions(|transaction| {
            student.is_none_or(|student| transaction.student_id == student)
        }))
    }

    fn list_awarded_badge_names(&self, student: StudentId) -> Result<Vec<String>, EngineError> {
        if !self.students.contains_key(&student) {
            return Err(EngineError::student_not_found(student));
        }

        Ok(self
            .badges
            .iter()
            .filter(|badge| badge.student_id == student)
            .map(|badge| badge.name.clone())
            .collect())
    }

    fn award_badge(&mut self, student: StudentId, name: &str) -> Result<AwardOutcome, EngineError> {
        if !self.students.contains_key(&student) {
            return Err(EngineError::student_not_found(student));
        }

        let already_awarded = self
            .badges
            .iter()
            .any(|badge| badge.student_id == student && badge.name == name);
        if already_awarded {
            return Ok(AwardOutcome::Duplicate);
        }

        let award = BadgeAward::new(student, name, Utc::now());
        self.badges.push(award.clone());
        Ok(AwardOutcome::Awarded(award))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
