//! End-to-end integration tests
//!
//! These tests validate the complete snapshot-to-output pipeline using
//! predefined CSV test fixtures. Each test:
//! 1. Loads the snapshot files from a fixture directory
//! 2. Runs a query through the savings engine
//! 3. Serializes the result
//! 4. Compares actual output with the expected file
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Happy path leaderboards
//! - Ranking tie-breaks
//! - Badge awarding flows
//! - Report summaries and monthly breakdowns
//! - Malformed and orphaned rows

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal::Decimal;
    use school_savings_engine::core::{ReportFilter, SavingsEngine, SavingsStore};
    use school_savings_engine::io::{
        load_snapshot, write_class_leaderboard_csv, write_student_leaderboard_csv,
    };
    use school_savings_engine::MemoryStore;
    use std::fs;
    use std::path::PathBuf;

    /// Load the snapshot files from tests/fixtures/{fixture_name}/
    ///
    /// Expects students.csv, classes.csv, and transactions.csv; badges.csv
    /// is loaded when present.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot cannot be loaded.
    fn fixture_store(fixture_name: &str) -> MemoryStore {
        let dir = PathBuf::from(format!("tests/fixtures/{}", fixture_name));
        let students = dir.join("students.csv");
        let classes = dir.join("classes.csv");
        let transactions = dir.join("transactions.csv");
        let badges = dir.join("badges.csv");
        let badges_path = badges.exists().then_some(badges.as_path());

        load_snapshot(&students, &classes, &transactions, badges_path)
            .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", fixture_name, e))
    }

    /// Compare actual output with an expected file from the fixture directory
    ///
    /// # Panics
    ///
    /// Panics if the expected file cannot be read or the output differs.
    fn assert_matches_fixture(fixture_name: &str, expected_file: &str, actual: &str) {
        let expected_path = format!("tests/fixtures/{}/{}", fixture_name, expected_file);
        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual, expected,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual, expected
        );
    }

    /// Student leaderboard output for all leaderboard fixtures
    #[rstest]
    #[case::happy_path("happy_path")]
    #[case::count_beats_balance("count_beats_balance")]
    #[case::malformed_data("malformed_data")]
    fn test_student_leaderboard_fixtures(#[case] fixture: &str) {
        let engine = SavingsEngine::new(fixture_store(fixture));

        let entries = engine.student_leaderboard(None).unwrap();
        let mut output = Vec::new();
        write_student_leaderboard_csv(&entries, &mut output).unwrap();

        assert_matches_fixture(fixture, "expected.csv", &String::from_utf8(output).unwrap());
    }

    #[test]
    fn test_class_leaderboard_with_limit() {
        let engine = SavingsEngine::new(fixture_store("class_ranking"));

        let entries = engine.class_leaderboard(Some(1)).unwrap();
        let mut output = Vec::new();
        write_class_leaderboard_csv(&entries, &mut output).unwrap();

        assert_matches_fixture(
            "class_ranking",
            "expected.csv",
            &String::from_utf8(output).unwrap(),
        );
    }

    #[test]
    fn test_balances_from_snapshot() {
        let engine = SavingsEngine::new(fixture_store("happy_path"));

        // Verified deposits minus verified withdrawals; pending rows ignored.
        assert_eq!(engine.net_balance(1).unwrap(), Decimal::new(11000000, 2));
        // Balances are not gated on enrollment status.
        assert_eq!(engine.net_balance(4).unwrap(), Decimal::new(99999900, 2));
        // Unknown students simply have nothing saved.
        assert_eq!(engine.net_balance(99).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_ranks_from_snapshot() {
        let engine = SavingsEngine::new(fixture_store("happy_path"));

        assert_eq!(engine.student_rank(1).unwrap(), 1);
        assert_eq!(engine.student_rank(2).unwrap(), 2);
        assert_eq!(engine.student_rank(3).unwrap(), 3);
        // Graduated students are not ranked.
        assert_eq!(engine.student_rank(4).unwrap(), 0);
        assert_eq!(engine.student_rank(99).unwrap(), 0);

        assert_eq!(engine.class_rank(1).unwrap(), 1);
        assert_eq!(engine.class_rank(2).unwrap(), 2);
        assert_eq!(engine.class_rank(99).unwrap(), 0);
    }

    #[test]
    fn test_badge_awarding_flow() {
        let mut engine = SavingsEngine::new(fixture_store("badge_awards"));

        // Five verified deposits totaling 60000; "Penabung Pemula" is
        // already on record in badges.csv.
        let awarded = engine.evaluate_badges(1).unwrap();
        let names: Vec<&str> = awarded.iter().map(|award| award.name.as_str()).collect();
        assert_eq!(names, vec!["Penabung Rajin", "Tabungan 10K", "Tabungan 50K"]);

        // A second evaluation finds nothing new.
        assert!(engine.evaluate_badges(1).unwrap().is_empty());
        assert_eq!(engine.store().list_awarded_badge_names(1).unwrap().len(), 4);
    }

    #[test]
    fn test_summary_report() {
        let engine = SavingsEngine::new(fixture_store("reports"));

        let summary = engine.report_summary(&ReportFilter::default()).unwrap();
        let mut output = Vec::new();
        school_savings_engine::io::write_summary_csv(&summary, &mut output).unwrap();

        assert_matches_fixture(
            "reports",
            "expected_summary.csv",
            &String::from_utf8(output).unwrap(),
        );
    }

    #[test]
    fn test_summary_report_with_range() {
        use chrono::{TimeZone, Utc};

        let engine = SavingsEngine::new(fixture_store("reports"));

        let filter = ReportFilter {
            start: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()),
            class: None,
        };
        let summary = engine.report_summary(&filter).unwrap();

        assert_eq!(summary.total_transactions, 3);
        assert_eq!(summary.total_deposited, Decimal::new(6000000, 2));
        assert_eq!(summary.total_withdrawn, Decimal::new(1000000, 2));
        // The active head count ignores the date range.
        assert_eq!(summary.active_student_count, 3);
        assert_eq!(summary.average_net_savings, Decimal::new(3000000, 2));
    }

    #[test]
    fn test_monthly_report() {
        let engine = SavingsEngine::new(fixture_store("reports"));

        let months = engine.monthly_report(2024, None).unwrap();
        let mut output = Vec::new();
        school_savings_engine::io::write_monthly_csv(&months, &mut output).unwrap();

        assert_matches_fixture(
            "reports",
            "expected_monthly.csv",
            &String::from_utf8(output).unwrap(),
        );
    }

    #[test]
    fn test_monthly_report_with_class_filter() {
        let engine = SavingsEngine::new(fixture_store("reports"));

        let months = engine.monthly_report(2024, Some(2)).unwrap();

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month, 3);
        assert_eq!(months[0].total_transactions, 1);
        assert_eq!(months[0].total_deposited, Decimal::new(2500000, 2));
        assert_eq!(months[0].total_withdrawn, Decimal::ZERO);
    }
}
