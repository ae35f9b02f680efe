//! Error types for the School Savings Engine
//!
//! This module defines all error types that can occur while loading
//! snapshots and computing balances, rankings, and badge awards.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Lookup Errors**: Unknown student or class identifiers
//! - **Arithmetic Errors**: Overflow in balance aggregation
//! - **Storage Errors**: Failures raised by the backing store

use super::class::ClassId;
use super::student::StudentId;
use thiserror::Error;

/// Main error type for the savings engine
///
/// This enum represents all possible errors that can occur while
/// answering a query. Each variant includes relevant context to help
/// diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents the snapshot from loading.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and loading continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// No student exists with the given identifier
    ///
    /// Raised by queries that target a single student, such as a
    /// balance lookup or badge evaluation for an unknown ID.
    #[error("Student {student} not found")]
    StudentNotFound {
        /// The unknown student ID
        student: StudentId,
    },

    /// No class exists with the given identifier
    ///
    /// Raised by class-scoped queries when the class ID is unknown.
    #[error("Class {class} not found")]
    ClassNotFound {
        /// The unknown class ID
        class: ClassId,
    },

    /// Arithmetic overflow would occur
    ///
    /// The offending transaction is rejected from the aggregate to keep
    /// balances consistent.
    #[error("Arithmetic overflow in {operation} for student {student}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Student ID
        student: StudentId,
    },

    /// The backing store failed to read or write data
    ///
    /// This is a fatal error for the query that triggered it.
    #[error("Storage error: {message}")]
    StorageError {
        /// Description of the storage failure
        message: String,
    },
}

// Conversion from io::Error to EngineError
impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to EngineError
impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        EngineError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl EngineError {
    /// Create a StudentNotFound error
    pub fn student_not_found(student: StudentId) -> Self {
        EngineError::StudentNotFound { student }
    }

    /// Create a ClassNotFound error
    pub fn class_not_found(class: ClassId) -> Self {
        EngineError::ClassNotFound { class }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, student: StudentId) -> Self {
        EngineError::ArithmeticOverflow {
            operation: operation.to_string(),
            student,
        }
    }

    /// Create a StorageError
    pub fn storage_error(message: impl Into<String>) -> Self {
        EngineError::StorageError {
            message: message.into(),
        }
    }

    /// Create a ParseError with an optional line number
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        EngineError::ParseError {
            line,
            message: message.into(),
        }
    }
}
