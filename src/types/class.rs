//! Class master-data types for the School Savings Engine

use serde::{Deserialize, Serialize};

/// Class identifier
///
/// Supports class IDs from 0 to 4,294,967,295 (serial primary key
/// in the backing store)
pub type ClassId = u32;

/// Class master-data record
///
/// A snapshot row describing one class. The homeroom-teacher reference
/// carried by the backing store is master data no engine operation
/// reads, so it is not part of this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    /// The class ID (u32 serial)
    pub id: ClassId,

    /// Display name, compared byte-wise for leaderboard tie-breaks
    pub name: String,

    /// Grade-level label (e.g. "1", "2")
    pub level: String,
}

impl SchoolClass {
    /// Create a new class record
    pub fn new(id: ClassId, name: impl Into<String>, level: impl Into<String>) -> Self {
        SchoolClass {
            id,
            name: name.into(),
            level: level.into(),
        }
    }
}
