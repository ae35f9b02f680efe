//! Badge award types for the School Savings Engine
//!
//! A badge is identified by its display name; the catalog of rules that
//! decides when one is earned lives in the core badge module.

use super::student::StudentId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A badge granted to a student
///
/// Awards are unique per (student, badge name); evaluating the rules a
/// second time never produces a second copy of the same award.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeAward {
    /// The student who earned the badge
    pub student_id: StudentId,

    /// Display name of the badge, e.g. "Penabung Rajin"
    pub name: String,

    /// When the award was granted
    pub awarded_at: DateTime<Utc>,
}

impl BadgeAward {
    /// Create a new badge award
    pub fn new(student_id: StudentId, name: impl Into<String>, awarded_at: DateTime<Utc>) -> Self {
        BadgeAward {
            student_id,
            name: name.into(),
            awarded_at,
        }
    }
}
