//! Balance computation module
//!
//! This module provides the pure aggregation underneath every balance,
//! leaderboard, and badge query: folding a slice of transactions into
//! per-student verified totals.
//!
//! The functions here are responsible for:
//! - Filtering to verified transactions (pending/rejected never count)
//! - Summing deposit amounts minus withdrawal amounts with checked
//!   decimal arithmetic
//! - Counting verified deposits for badge and ranking rules
//!
//! Stores are expected to push the verified filter down, but the fold
//! re-checks the status itself so it is correct for arbitrary slices.

use crate::types::{EngineError, StudentId, Transaction, TransactionKind};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Verified savings totals for one student
///
/// `net_balance` is verified deposits minus verified withdrawals; it
/// may go negative and is reproduced exactly, never floored at zero.
/// `deposit_count` counts verified deposits only, ignoring withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SavingsTally {
    /// Count of verified deposit transactions
    pub deposit_count: u32,

    /// Net verified balance with 2 fractional digits
    pub net_balance: Decimal,
}

impl SavingsTally {
    /// Fold one verified transaction into the tally
    ///
    /// Uses checked arithmetic so an overflowing amount rejects the
    /// whole aggregation instead of corrupting the balance.
    fn apply(&mut self, transaction: &Transaction) -> Result<(), EngineError> {
        match transaction.kind {
            TransactionKind::Deposit => {
                self.net_balance = self
                    .net_balance
                    .checked_add(transaction.amount)
                    .ok_or_else(|| {
                        EngineError::arithmetic_overflow("deposit", transaction.student_id)
                    })?;
                self.deposit_count += 1;
            }
            TransactionKind::Withdrawal => {
                self.net_balance = self
                    .net_balance
                    .checked_sub(transaction.amount)
                    .ok_or_else(|| {
                        EngineError::arithmetic_overflow("withdrawal", transaction.student_id)
                    })?;
            }
        }

        Ok(())
    }
}

/// Compute one student's verified savings tally
///
/// Transactions belonging to other students and transactions that are
/// not verified are skipped. A student with zero verified transactions
/// gets the zero tally, never an error.
pub fn tally_for_student(
    student: StudentId,
    transactions: &[Transaction],
) -> Result<SavingsTally, EngineError> {
    let mut tally = SavingsTally::default();

    for transaction in transactions {
        if transaction.student_id != student || !transaction.is_verified() {
            continue;
        }
        tally.apply(transaction)?;
    }

    Ok(tally)
}

/// Compute one student's net verified balance
///
/// Sums verified deposits minus verified withdrawals, exact to 2
/// fractional digits. Returns `Decimal::ZERO` for a student with no
/// verified transactions.
pub fn net_balance(
    student: StudentId,
    transactions: &[Transaction],
) -> Result<Decimal, EngineError> {
    Ok(tally_for_student(student, transactions)?.net_balance)
}

/// Tally every student appearing in the slice
///
/// Students without verified transactions simply have no entry; callers
/// ranking a full roster substitute the zero tally for missing keys.
pub fn tally_by_student(
    transactions: &[Transaction],
) -> Result<HashMap<StudentId, SavingsTally>, EngineError> {
    let mut tallies: HashMap<StudentId, SavingsTally> = HashMap::new();

    for transaction in transactions {
        if !transaction.is_verified() {
            continue;
        }
        tallies
            .entry(transaction.student_id)
            .or_default()
            .apply(transaction)?;
    }

    Ok(tallies)
}
