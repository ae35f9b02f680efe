//! Savings query engine
//!
//! This module provides the SavingsEngine that answers every balance,
//! ranking, badge, and report query by coordinating the pure
//! aggregation modules with an injected `SavingsStore`.
//!
//! The engine enforces the query contracts:
//! - Rankings are recomputed from a fresh snapshot on every call
//! - Rank lookups return the 0 sentinel for identities absent from the
//!   rankable set, never an error
//! - Badge evaluation awards each rule at most once and treats a
//!   storage-level duplicate as a benign no-op

use crate::core::badges::BADGE_RULES;
use crate::core::balance;
use crate::core::leaderboard::{self, RankedClass, RankedStudent, DEFAULT_LEADERBOARD_LIMIT};
use crate::core::reports::{self, MonthlyReport, ReportFilter, ReportSummary};
use crate::core::traits::{AwardOutcome, SavingsStore};
use crate::types::{BadgeAward, ClassId, EngineError, StudentId};
use rust_decimal::Decimal;

/// Balance and ranking engine over an injected store
///
/// Stateless between calls; every query reads a fresh snapshot through
/// the store. The only write path is badge persistence in
/// [`evaluate_badges`](SavingsEngine::evaluate_badges).
pub struct SavingsEngine<S: SavingsStore> {
    store: S,
}

impl<S: SavingsStore> SavingsEngine<S> {
    /// Create an engine over the given store
    pub fn new(store: S) -> Self {
        SavingsEngine { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Compute a student's net verified balance
    ///
    /// Verified deposits minus verified withdrawals, exact to 2
    /// fractional digits and possibly negative. A student with no
    /// verified transactions (including an unknown id) gets
    /// `Decimal::ZERO`; existence checks belong to the storage
    /// collaborator, not this query.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or an amount overflows the
    /// decimal accumulator.
    pub fn net_balance(&self, student: StudentId) -> Result<Decimal, EngineError> {
        let transactions = self.store.list_verified_transactions(Some(student))?;
        balance::net_balance(student, &transactions)
    }

    /// Compute the student leaderboard
    ///
    /// Active students ranked by deposit count desc, net balance desc,
    /// name asc, id asc, with 1-based ranks assigned before truncation
    /// to `limit` (default 10). A limit beyond the candidate count
    /// returns every candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a balance overflows.
    pub fn student_leaderboard(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<RankedStudent>, EngineError> {
        let mut ranking = self.full_student_ranking()?;
        ranking.truncate(limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT));
        Ok(ranking)
    }

    /// Compute the class leaderboard
    ///
    /// Every class ranked by verified transaction count desc, active
    /// student count desc, name asc, id asc; 1-based ranks; truncated
    /// to `limit` (default 10).
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn class_leaderboard(&self, limit: Option<usize>) -> Result<Vec<RankedClass>, EngineError> {
        let mut ranking = self.full_class_ranking()?;
        ranking.truncate(limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT));
        Ok(ranking)
    }

    /// Find a student's 1-based leaderboard position
    ///
    /// Recomputes the full untruncated ranking and locates the student
    /// in it. Returns `0` when the student is not in the rankable set
    /// (inactive or unknown); callers must treat `0` as "unranked",
    /// not "rank zero".
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a balance overflows.
    pub fn student_rank(&self, student: StudentId) -> Result<u32, EngineError> {
        let ranking = self.full_student_ranking()?;
        Ok(ranking
            .iter()
            .find(|entry| entry.student_id == student)
            .map(|entry| entry.rank)
            .unwrap_or(0))
    }

    /// Find a class's 1-based leaderboard position
    ///
    /// Returns `0` for a class id absent from the snapshot. A class
    /// with no active students still ranks and gets a nonzero rank.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn class_rank(&self, class: ClassId) -> Result<u32, EngineError> {
        let ranking = self.full_class_ranking()?;
        Ok(ranking
            .iter()
            .find(|entry| entry.class_id == class)
            .map(|entry| entry.rank)
            .unwrap_or(0))
    }

    /// Evaluate badge rules for a student and persist new awards
    ///
    /// Computes the student's verified tally, then walks the fixed rule
    /// table in order and awards every newly satisfied badge exactly
    /// once. Rules whose badge is already recorded are skipped; a
    /// `Duplicate` outcome from the store (a concurrent evaluator won
    /// the race) is a benign no-op and evaluation continues. Running
    /// twice with no new transactions awards nothing the second time.
    ///
    /// # Returns
    ///
    /// The newly awarded badges, in rule-table order.
    ///
    /// # Errors
    ///
    /// Returns `StudentNotFound` for an unknown student id; the store
    /// refuses badge evaluation for students that do not exist.
    pub fn evaluate_badges(&mut self, student: StudentId) -> Result<Vec<BadgeAward>, EngineError> {
        let awarded = self.store.list_awarded_badge_names(student)?;
        let transactions = self.store.list_verified_transactions(Some(student))?;
        let tally = balance::tally_for_student(student, &transactions)?;

        let mut new_awards = Vec::new();
        for rule in BADGE_RULES.iter() {
            if !rule.satisfied_by(&tally) {
                continue;
            }
            if awarded.iter().any(|name| name == rule.name) {
                continue;
            }

            match self.store.award_badge(student, rule.name)? {
                AwardOutcome::Awarded(award) => new_awards.push(award),
                // Lost the race to a concurrent evaluator.
                AwardOutcome::Duplicate => {}
            }
        }

        Ok(new_awards)
    }

    /// Compute the summary report
    ///
    /// Totals cover every transaction matching the filter regardless of
    /// verification status; the savings average covers verified rows of
    /// active students only. Both quirks mirror the recorded reporting
    /// behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a total overflows.
    pub fn report_summary(&self, filter: &ReportFilter) -> Result<ReportSummary, EngineError> {
        let students = self.store.list_students()?;
        let transactions = self.store.list_transactions(None)?;
        reports::summarize(&students, &transactions, filter)
    }

    /// Compute the per-month breakdown for one year
    ///
    /// Months without transactions are skipped; results are ordered by
    /// month ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a monthly total
    /// overflows.
    pub fn monthly_report(
        &self,
        year: i32,
        class: Option<ClassId>,
    ) -> Result<Vec<MonthlyReport>, EngineError> {
        let students = self.store.list_students()?;
        let transactions = self.store.list_transactions(None)?;
        reports::monthly_breakdown(&students, &transactions, year, class)
    }

    fn full_student_ranking(&self) -> Result<Vec<RankedStudent>, EngineError> {
        let students = self.store.list_active_students()?;
        let classes = self.store.list_classes()?;
        let transactions = self.store.list_verified_transactions(None)?;
        leaderboard::rank_students(&students, &classes, &transactions)
    }

    fn full_class_ranking(&self) -> Result<Vec<RankedClass>, EngineError> {
        let classes = self.store.list_classes()?;
        let students = self.store.list_students()?;
        let transactions = self.store.list_verified_transactions(None)?;
        Ok(leaderboard::rank_classes(&classes, &students, &transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory_store::MemoryStore;
    use crate::types::{
        SchoolClass, Student, StudentStatus, Transaction, TransactionKind, VerificationStatus,
    };
    use chrono::{TimeZone, Utc};

    fn engine_with(store: MemoryStore) -> SavingsEngine<MemoryStore> {
        SavingsEngine::new(store)
    }

    fn base_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.add_class(SchoolClass::new(1, "Kelas 1A", "1"));
        store.add_class(SchoolClass::new(2, "Kelas 1B", "1"));
        store
    }

    fn add_deposit(store: &mut MemoryStore, id: u32, student: StudentId, amount: i64) {
        store.add_transaction(Transaction::verified(
            id,
            student,
            Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap(),
            Decimal::new(amount * 100, 2),
            TransactionKind::Deposit,
        ));
    }

    fn add_withdrawal(store: &mut MemoryStore, id: u32, student: StudentId, amount: i64) {
        store.add_transaction(Transaction::verified(
            id,
            student,
            Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap(),
            Decimal::new(amount * 100, 2),
            TransactionKind::Withdrawal,
        ));
    }

    fn add_pending_deposit(store: &mut MemoryStore, id: u32, student: StudentId, amount: i64) {
        store.add_transaction(Transaction {
            id,
            student_id: student,
            date: Utc.with_ymd_and_hms(2024, 9, 3, 8, 0, 0).unwrap(),
            amount: Decimal::new(amount * 100, 2),
            kind: TransactionKind::Deposit,
            status: VerificationStatus::Pending,
            rejection_note: None,
        });
    }

    #[test]
    fn test_net_balance_nets_verified_and_ignores_pending() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        add_deposit(&mut store, 1, 1, 100000);
        add_deposit(&mut store, 2, 1, 20000);
        add_withdrawal(&mut store, 3, 1, 10000);
        add_pending_deposit(&mut store, 4, 1, 50000);

        let engine = engine_with(store);

        assert_eq!(
            engine.net_balance(1).unwrap(),
            Decimal::new(11000000, 2) // 110000.00
        );
    }

    #[test]
    fn test_net_balance_without_transactions_is_zero() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));

        let engine = engine_with(store);

        assert_eq!(engine.net_balance(1).unwrap(), Decimal::ZERO);
        // Unknown students are the storage layer's concern; the query
        // simply sees no transactions.
        assert_eq!(engine.net_balance(999).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_leaderboard_deposit_count_beats_net_balance() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        store.add_student(Student::new(2, "Budi", 1));
        // Andi: 3 deposits, net 105000. Budi: 2 deposits, net 110000.
        add_deposit(&mut store, 1, 1, 35000);
        add_deposit(&mut store, 2, 1, 35000);
        add_deposit(&mut store, 3, 1, 35000);
        add_deposit(&mut store, 4, 2, 55000);
        add_deposit(&mut store, 5, 2, 55000);

        let engine = engine_with(store);
        let leaderboard = engine.student_leaderboard(None).unwrap();

        assert_eq!(leaderboard.len(), 2);
        assert_eq!(leaderboard[0].student_id, 1);
        assert_eq!(leaderboard[0].rank, 1);
        assert_eq!(leaderboard[0].class_name, "Kelas 1A");
        assert_eq!(leaderboard[1].student_id, 2);
        assert_eq!(leaderboard[1].rank, 2);
    }

    #[test]
    fn test_leaderboard_default_limit_is_ten() {
        let mut store = base_store();
        for id in 1..=12 {
            store.add_student(Student::new(id, format!("Siswa {id:02}"), 1));
        }

        let engine = engine_with(store);

        let truncated = engine.student_leaderboard(None).unwrap();
        assert_eq!(truncated.len(), 10);

        let all = engine.student_leaderboard(Some(100)).unwrap();
        assert_eq!(all.len(), 12);
        let ranks: Vec<u32> = all.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn test_student_rank_matches_unlimited_leaderboard_position() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        store.add_student(Student::new(2, "Budi", 1));
        store.add_student(Student::new(3, "Citra", 2));
        add_deposit(&mut store, 1, 3, 90000);
        add_deposit(&mut store, 2, 3, 90000);
        add_deposit(&mut store, 3, 1, 10000);

        let engine = engine_with(store);
        let leaderboard = engine.student_leaderboard(Some(100)).unwrap();

        for entry in &leaderboard {
            assert_eq!(engine.student_rank(entry.student_id).unwrap(), entry.rank);
        }
    }

    #[test]
    fn test_student_rank_sentinel_for_inactive_and_unknown() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        store.add_student(Student::with_status(2, "Budi", 1, StudentStatus::Graduated));

        let engine = engine_with(store);

        assert_eq!(engine.student_rank(1).unwrap(), 1);
        assert_eq!(engine.student_rank(2).unwrap(), 0);
        assert_eq!(engine.student_rank(999).unwrap(), 0);
    }

    #[test]
    fn test_class_leaderboard_limit_one_returns_only_the_top_class() {
        let mut store = base_store();
        // Class 1: 3 verified transactions over 2 active students.
        // Class 2: 1 verified transaction over 1 active student.
        store.add_student(Student::new(1, "Andi", 1));
        store.add_student(Student::new(2, "Budi", 1));
        store.add_student(Student::new(3, "Citra", 2));
        add_deposit(&mut store, 1, 1, 10000);
        add_deposit(&mut store, 2, 1, 20000);
        add_withdrawal(&mut store, 3, 2, 5000);
        add_deposit(&mut store, 4, 3, 30000);

        let engine = engine_with(store);
        let leaderboard = engine.class_leaderboard(Some(1)).unwrap();

        assert_eq!(leaderboard.len(), 1);
        assert_eq!(leaderboard[0].class_id, 1);
        assert_eq!(leaderboard[0].rank, 1);
        assert_eq!(leaderboard[0].total_transactions, 3);
        assert_eq!(leaderboard[0].active_student_count, 2);
    }

    #[test]
    fn test_class_rank_sentinel_only_for_unknown_classes() {
        let store = base_store();

        let engine = engine_with(store);

        // Both classes rank despite having no students at all.
        assert_eq!(engine.class_rank(1).unwrap(), 1);
        assert_eq!(engine.class_rank(2).unwrap(), 2);
        assert_eq!(engine.class_rank(999).unwrap(), 0);
    }

    #[test]
    fn test_evaluate_badges_awards_cumulatively_across_calls() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        add_deposit(&mut store, 1, 1, 500);

        let mut engine = engine_with(store);

        // First deposit earns the starter badge.
        let first = engine.evaluate_badges(1).unwrap();
        let names: Vec<&str> = first.iter().map(|award| award.name.as_str()).collect();
        assert_eq!(names, vec!["Penabung Pemula"]);

        // Four more deposits reach the 5-deposit rule; the starter
        // badge is not re-awarded.
        for id in 2..=5 {
            add_deposit(engine.store_mut(), id, 1, 500);
        }
        let second = engine.evaluate_badges(1).unwrap();
        let names: Vec<&str> = second.iter().map(|award| award.name.as_str()).collect();
        assert_eq!(names, vec!["Penabung Rajin"]);

        // Five more reach the 10-deposit rule.
        for id in 6..=10 {
            add_deposit(engine.store_mut(), id, 1, 500);
        }
        let third = engine.evaluate_badges(1).unwrap();
        let names: Vec<&str> = third.iter().map(|award| award.name.as_str()).collect();
        assert_eq!(names, vec!["Penabung Hebat"]);
    }

    #[test]
    fn test_evaluate_badges_is_idempotent_without_new_transactions() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        add_deposit(&mut store, 1, 1, 60000);

        let mut engine = engine_with(store);

        let first = engine.evaluate_badges(1).unwrap();
        assert!(!first.is_empty());

        let second = engine.evaluate_badges(1).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_evaluate_badges_awards_amount_thresholds_from_net_balance() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        add_deposit(&mut store, 1, 1, 100000);
        add_deposit(&mut store, 2, 1, 20000);
        add_withdrawal(&mut store, 3, 1, 10000);

        let mut engine = engine_with(store);
        let awards = engine.evaluate_badges(1).unwrap();

        let names: Vec<&str> = awards.iter().map(|award| award.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Penabung Pemula", "Tabungan 10K", "Tabungan 50K", "Tabungan 100K"]
        );
    }

    #[test]
    fn test_evaluate_badges_for_unknown_student_fails() {
        let store = base_store();

        let mut engine = engine_with(store);
        let result = engine.evaluate_badges(999);

        assert_eq!(result, Err(EngineError::StudentNotFound { student: 999 }));
    }

    #[test]
    fn test_evaluate_badges_treats_storage_duplicate_as_noop() {
        // A store whose awarded-names read lags behind its uniqueness
        // constraint, as a concurrent evaluator would cause.
        struct RacedStore {
            inner: MemoryStore,
        }

        impl SavingsStore for RacedStore {
            fn list_active_students(&self) -> Result<Vec<Student>, EngineError> {
                self.inner.list_active_students()
            }

            fn list_students(&self) -> Result<Vec<Student>, EngineError> {
                self.inner.list_students()
            }

            fn list_classes(&self) -> Result<Vec<SchoolClass>, EngineError> {
                self.inner.list_classes()
            }

            fn list_verified_transactions(
                &self,
                student: Option<StudentId>,
            ) -> Result<Vec<Transaction>, EngineError> {
                self.inner.list_verified_transactions(student)
            }

            fn list_transactions(
                &self,
                student: Option<StudentId>,
            ) -> Result<Vec<Transaction>, EngineError> {
                self.inner.list_transactions(student)
            }

            fn list_awarded_badge_names(
                &self,
                student: StudentId,
            ) -> Result<Vec<String>, EngineError> {
                self.inner.list_awarded_badge_names(student)?;
                Ok(Vec::new())
            }

            fn award_badge(
                &mut self,
                student: StudentId,
                name: &str,
            ) -> Result<AwardOutcome, EngineError> {
                self.inner.award_badge(student, name)
            }
        }

        let mut inner = base_store();
        inner.add_student(Student::new(1, "Andi", 1));
        add_deposit(&mut inner, 1, 1, 60000);
        // The concurrent evaluator already recorded the starter badge.
        inner.award_badge(1, "Penabung Pemula").unwrap();

        let mut engine = SavingsEngine::new(RacedStore { inner });
        let awards = engine.evaluate_badges(1).unwrap();

        // The duplicate is silently skipped; the remaining satisfied
        // rules still award.
        let names: Vec<&str> = awards.iter().map(|award| award.name.as_str()).collect();
        assert_eq!(names, vec!["Tabungan 10K", "Tabungan 50K"]);
    }

    #[test]
    fn test_report_summary_through_the_engine() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        add_deposit(&mut store, 1, 1, 10000);
        add_pending_deposit(&mut store, 2, 1, 90000);

        let engine = engine_with(store);
        let summary = engine.report_summary(&ReportFilter::default()).unwrap();

        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_deposited, Decimal::new(10000000, 2));
        assert_eq!(summary.active_student_count, 1);
        assert_eq!(summary.average_net_savings, Decimal::new(1000000, 2));
    }

    #[test]
    fn test_monthly_report_through_the_engine() {
        let mut store = base_store();
        store.add_student(Student::new(1, "Andi", 1));
        add_deposit(&mut store, 1, 1, 10000);
        add_withdrawal(&mut store, 2, 1, 4000);

        let engine = engine_with(store);
        let breakdown = engine.monthly_report(2024, None).unwrap();

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].month, 9);
        assert_eq!(breakdown[0].total_transactions, 2);
        assert_eq!(breakdown[0].total_deposited, Decimal::new(1000000, 2));
        assert_eq!(breakdown[0].total_withdrawn, Decimal::new(400000, 2));

        assert!(engine.monthly_report(2023, None).unwrap().is_empty());
    }
}
