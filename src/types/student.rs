//! Student master-data types for the School Savings Engine
//!
//! This module defines student identifiers, the enrollment status enum,
//! and the student record consumed by every ranking operation.

use super::class::ClassId;
use serde::{Deserialize, Serialize};

/// Student identifier
///
/// Supports student IDs from 0 to 4,294,967,295 (serial primary key
/// in the backing store)
pub type StudentId = u32;

/// Enrollment status of a student
///
/// Only `Active` students participate in leaderboards and rank lookups.
/// Transactions of graduated or inactive students remain on record but
/// never contribute to ranking output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    /// Currently enrolled; eligible for leaderboards and badges
    Active,

    /// Finished school; excluded from leaderboards
    Graduated,

    /// Dropped out or suspended; excluded from leaderboards
    Inactive,
}

impl StudentStatus {
    /// Whether this status makes the student rankable
    pub fn is_active(self) -> bool {
        matches!(self, StudentStatus::Active)
    }
}

/// Student master-data record
///
/// A snapshot row describing one student. The engine never mutates
/// students; creation and status changes belong to the external
/// persistence collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// The student ID (u32 serial)
    pub id: StudentId,

    /// Display name, compared byte-wise for leaderboard tie-breaks
    pub name: String,

    /// The class this student belongs to
    pub class_id: ClassId,

    /// Enrollment status; only `Active` students rank
    pub status: StudentStatus,
}

impl Student {
    /// Create a new active student
    ///
    /// # Arguments
    ///
    /// * `id` - The student ID
    /// * `name` - Display name
    /// * `class_id` - The class the student belongs to
    pub fn new(id: StudentId, name: impl Into<String>, class_id: ClassId) -> Self {
        Student {
            id,
            name: name.into(),
            class_id,
            status: StudentStatus::Active,
        }
    }

    /// Create a student with an explicit status
    pub fn with_status(
        id: StudentId,
        name: impl Into<String>,
        class_id: ClassId,
        status: StudentStatus,
    ) -> Self {
        Student {
            id,
            name: name.into(),
            class_id,
            status,
        }
    }
}
