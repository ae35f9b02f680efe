//! Core business logic module
//!
//! This module contains the balance and ranking components:
//! - `traits` - Storage abstraction the engine reads through
//! - `engine` - Query orchestration over an injected store
//! - `balance` - Verified tally and net balance aggregation
//! - `leaderboard` - Student and class ranking
//! - `badges` - Achievement rule table and satisfaction logic
//! - `reports` - Summary and monthly report aggregation
//! - `memory_store` - Reference in-memory `SavingsStore`

pub mod badges;
pub mod balance;
pub mod engine;
pub mod leaderboard;
pub mod memory_store;
pub mod reports;
pub mod traits;

pub use badges::{BadgeCriterion, BadgeRule, BADGE_RULES};
pub use balance::SavingsTally;
pub use engine::SavingsEngine;
pub use leaderboard::{RankedClass, RankedStudent, DEFAULT_LEADERBOARD_LIMIT};
pub use memory_store::MemoryStore;
pub use reports::{MonthlyReport, ReportFilter, ReportSummary};
pub use traits::{AwardOutcome, SavingsStore};
