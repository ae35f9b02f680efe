//! Transaction types for the School Savings Engine
//!
//! This module defines the deposit/withdrawal record and its two tag
//! enums. Rows arrive from the persistence collaborator already shaped
//! as these types; string-keyed row data never crosses into the core.

use super::student::StudentId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction identifier
///
/// Supports transaction IDs from 0 to 4,294,967,295
pub type TransactionId = u32;

/// Direction of a savings transaction
///
/// The amount itself is always stored positive; the sign of its
/// contribution to a balance is derived from this tag at aggregation
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money paid into the student's savings
    Deposit,

    /// Money taken out of the student's savings
    Withdrawal,
}

/// Verification state of a transaction
///
/// Every transaction starts `Pending` until a teacher verifies or
/// rejects it. Only `Verified` transactions contribute to balances,
/// leaderboards, and badge evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Awaiting teacher review
    Pending,

    /// Confirmed; counts toward every aggregate
    Verified,

    /// Declined; kept on record with a rejection note, never counted
    Rejected,
}

/// A single deposit or withdrawal record
///
/// Amounts are decimal values with 2 fractional digits and are always
/// positive; [`TransactionKind`] carries the direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The transaction ID (u32 serial)
    pub id: TransactionId,

    /// The student this transaction belongs to
    pub student_id: StudentId,

    /// When the deposit/withdrawal happened
    pub date: DateTime<Utc>,

    /// Positive amount with 2 fractional digits
    pub amount: Decimal,

    /// Deposit or withdrawal
    pub kind: TransactionKind,

    /// Verification state; only `Verified` rows are ever aggregated
    pub status: VerificationStatus,

    /// Reviewer note attached when the transaction was rejected
    pub rejection_note: Option<String>,
}

impl Transaction {
    /// Create a verified transaction
    ///
    /// Convenience constructor for the common case; callers that need a
    /// pending or rejected row set `status`/`rejection_note` explicitly.
    pub fn verified(
        id: TransactionId,
        student_id: StudentId,
        date: DateTime<Utc>,
        amount: Decimal,
        kind: TransactionKind,
    ) -> Self {
        Transaction {
            id,
            student_id,
            date,
            amount,
            kind,
            status: VerificationStatus::Verified,
            rejection_note: None,
        }
    }

    /// Whether this transaction counts toward balances and rankings
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }

    /// Whether this is a verified deposit
    pub fn is_verified_deposit(&self) -> bool {
        self.is_verified() && self.kind == TransactionKind::Deposit
    }
}
