//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `student`: Student records, identifiers, and enrollment status
//! - `class`: Class master data and identifiers
//! - `transaction`: Savings transaction records and tag enums
//! - `badge`: Badge award records
//! - `error`: Error types for the savings engine

pub mod badge;
pub mod class;
pub mod error;
pub mod student;
pub mod transaction;

pub use badge::BadgeAward;
pub use class::{ClassId, SchoolClass};
pub use error::EngineError;
pub use student::{Student, StudentId, StudentStatus};
pub use transaction::{Transaction, TransactionId, TransactionKind, VerificationStatus};
