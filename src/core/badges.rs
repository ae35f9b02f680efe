//! Badge rule module
//!
//! This module holds the fixed, ordered table of achievement rules and
//! the logic deciding which rules a student's stats satisfy. Award
//! persistence and the once-only guarantee live in the storage layer;
//! this module is pure.
//!
//! The rule set mixes two criteria on purpose: count badges look at the
//! verified deposit count (withdrawals ignored), amount badges look at
//! the net verified balance (withdrawals netted). The asymmetry is
//! inherited source-system behavior and is preserved, not reconciled.

use super::balance::SavingsTally;
use rust_decimal::Decimal;

/// Threshold criterion for one badge rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCriterion {
    /// Verified deposit count reaching the threshold
    DepositCount(u32),

    /// Net verified balance reaching the threshold, in whole currency
    /// units
    NetBalance(i64),
}

/// One named achievement rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    /// Display name of the badge this rule awards
    pub name: &'static str,

    /// Threshold that earns the badge
    pub criterion: BadgeCriterion,
}

impl BadgeRule {
    /// Whether the rule's threshold is met by the given tally
    pub fn satisfied_by(&self, tally: &SavingsTally) -> bool {
        match self.criterion {
            BadgeCriterion::DepositCount(min) => tally.deposit_count >= min,
            BadgeCriterion::NetBalance(min) => tally.net_balance >= Decimal::from(min),
        }
    }
}

/// The fixed badge rule table, in evaluation order
///
/// Badge names are data inherited from the source system and must not
/// be translated or renamed.
pub const BADGE_RULES: [BadgeRule; 6] = [
    BadgeRule {
        name: "Penabung Pemula",
        criterion: BadgeCriterion::DepositCount(1),
    },
    BadgeRule {
        name: "Penabung Rajin",
        criterion: BadgeCriterion::DepositCount(5),
    },
    BadgeRule {
        name: "Penabung Hebat",
        criterion: BadgeCriterion::DepositCount(10),
    },
    BadgeRule {
        name: "Tabungan 10K",
        criterion: BadgeCriterion::NetBalance(10_000),
    },
    BadgeRule {
        name: "Tabungan 50K",
        criterion: BadgeCriterion::NetBalance(50_000),
    },
    BadgeRule {
        name: "Tabungan 100K",
        criterion: BadgeCriterion::NetBalance(100_000),
    },
];

/// Names of the rules satisfied by the given tally, in table order
pub fn satisfied_badge_names(tally: &SavingsTally) -> Vec<&'static str> {
    BADGE_RULES
        .iter()
        .filter(|rule| rule.satisfied_by(tally))
        .map(|rule| rule.name)
        .collect()
}
