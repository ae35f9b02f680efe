//! Snapshot loading from CSV files
//!
//! Loads the snapshot files (classes, students, transactions, and
//! optionally badges) into a [`MemoryStore`]. Rows that fail
//! validation or reference unknown ids are reported to stderr with
//! their line number and skipped; only a missing or unreadable file
//! aborts the load.

use crate::core::MemoryStore;
use crate::io::csv_format::{self, CsvBadge, CsvStudent, CsvTransaction};
use crate::types::{ClassId, SchoolClass, StudentId};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn open_reader(path: &Path) -> Result<csv::Reader<BufReader<File>>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    Ok(ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .buffer_capacity(8 * 1024)
        .from_reader(BufReader::new(file)))
}

/// Read and convert every row of one snapshot file
///
/// Applies `convert` to each deserialized row. Rows that fail to
/// deserialize or convert are reported to stderr and skipped.
fn load_rows<R, T>(
    path: &Path,
    mut convert: impl FnMut(R) -> Result<T, String>,
) -> Result<Vec<T>, String>
where
    R: DeserializeOwned,
{
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();

    for (index, result) in reader.deserialize::<R>().enumerate() {
        // Line 1 is the header, so the first record is line 2.
        let line = index + 2;
        match result.map_err(|e| e.to_string()).and_then(&mut convert) {
            Ok(row) => rows.push(row),
            Err(e) => eprintln!("{}: line {}: {}", path.display(), line, e),
        }
    }

    Ok(rows)
}

/// Load a complete snapshot into a memory store
///
/// Files are loaded in dependency order so referential checks can run
/// against already loaded ids: classes first, then students, then
/// transactions, then badges. The badges file is optional; without it
/// the store starts with no awards on record.
///
/// Duplicate ids and rows referencing unknown ids mirror the database
/// constraints of the snapshot source and are skipped like any other
/// invalid row.
pub fn load_snapshot(
    students_path: &Path,
    classes_path: &Path,
    transactions_path: &Path,
    badges_path: Option<&Path>,
) -> Result<MemoryStore, String> {
    let mut seen_classes = HashSet::new();
    let classes = load_rows(classes_path, |class: SchoolClass| {
        if !seen_classes.insert(class.id) {
            return Err(format!("Duplicate class id {}", class.id));
        }
        Ok(class)
    })?;
    let class_ids: HashSet<ClassId> = classes.iter().map(|class| class.id).collect();

    let mut seen_students = HashSet::new();
    let students = load_rows(students_path, |row: CsvStudent| {
        let student = csv_format::convert_student(row)?;
        if !class_ids.contains(&student.class_id) {
            return Err(format!(
                "Student {} references unknown class {}",
                student.id, student.class_id
            ));
        }
        if !seen_students.insert(student.id) {
            return Err(format!("Duplicate student id {}", student.id));
        }
        Ok(student)
    })?;
    let student_ids: HashSet<StudentId> = students.iter().map(|student| student.id).collect();

    let mut seen_transactions = HashSet::new();
    let transactions = load_rows(transactions_path, |row: CsvTransaction| {
        let transaction = csv_format::convert_transaction(row)?;
        if !student_ids.contains(&transaction.student_id) {
            return Err(format!(
                "Transaction {} references unknown student {}",
                transaction.id, transaction.student_id
            ));
        }
        if !seen_transactions.insert(transaction.id) {
            return Err(format!("Duplicate transaction id {}", transaction.id));
        }
        Ok(transaction)
    })?;

    let badges = match badges_path {
        Some(path) => {
            let mut seen_badges = HashSet::new();
            load_rows(path, |row: CsvBadge| {
                let badge = csv_format::convert_badge(row)?;
                if !student_ids.contains(&badge.student_id) {
                    return Err(format!(
                        "Badge award references unknown student {}",
                        badge.student_id
                    ));
                }
                if !seen_badges.insert((badge.student_id, badge.name.clone())) {
                    return Err(format!(
                        "Duplicate badge '{}' for student {}",
                        badge.name, badge.student_id
                    ));
                }
                Ok(badge)
            })?
        }
        None => Vec::new(),
    };

    let mut store = MemoryStore::new();
    for class in classes {
        store.add_class(class);
    }
    for student in students {
        store.add_student(student);
    }
    for transaction in transactions {
        store.add_transaction(transaction);
    }
    for badge in badges {
        store.add_badge(badge);
    }

    Ok(store)
}
