//! School Savings Engine Library
//! # Overview
//!
//! This library ranks school savings activity from CSV snapshots: net verified
//! balances, student and class leaderboards, rank lookups, threshold badge
//! awards, and savings reports.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Student, Transaction, BadgeAward, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Query orchestration over a savings store
//!   - [`core::balance`] - Net verified balance aggregation
//!   - [`core::leaderboard`] - Student and class ranking
//!   - [`core::badges`] - Threshold badge rules
//!   - [`core::reports`] - Summary and monthly reports
//! - [`io`] - CSV snapshot loading and query output
//!
//! # Balance Rules
//!
//! Only verified transactions move a balance:
//!
//! - **Deposit** (verified): Adds to the student's net balance
//! - **Withdrawal** (verified): Subtracts from the net balance, which may go
//!   negative
//! - **Pending / Rejected**: Never counted, regardless of kind
//!
//! # Ranking
//!
//! Students are ranked by verified deposit count, then net balance, then name;
//! classes by verified transaction count of their active students, then active
//! student count, then name. A student or class absent from a ranking has rank
//! 0.
//!
//! # Badges
//!
//! Badges are awarded once per student when a threshold is reached: deposit
//! count thresholds at 1, 5, and 10 and net balance thresholds at 10000,
//! 50000, and 100000.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{
    AwardOutcome, MemoryStore, ReportFilter, SavingsEngine, SavingsStore,
    DEFAULT_LEADERBOARD_LIMIT,
};
pub use io::load_snapshot;
pub use types::{
    BadgeAward, ClassId, EngineError, SchoolClass, Student, StudentId, StudentStatus, Transaction,
    TransactionId, TransactionKind, VerificationStatus,
};
