// 📤 Exporter - store → three CSV files
// Natural keys only: transactions point at people by email and at
// categories by name, so the files reload into any empty store.

use crate::db::{get_all_categories, get_all_people, get_all_transactions, DATE_FORMAT};
use crate::records::{
    display_name, CategoryRow, DataFiles, PersonRow, TransactionRow, CATEGORY_HEADERS,
    PERSON_HEADERS, TRANSACTION_HEADERS,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Rows written per file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub persons: usize,
    pub categories: usize,
    pub transactions: usize,
}

/// Header first (even when there are no rows), then one line per record.
/// Existing files are overwritten.
fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(file = %display_name(path), rows = rows.len(), "exported");
    Ok(rows.len())
}

pub fn export_to_csv(conn: &Connection, files: &DataFiles) -> Result<ExportSummary> {
    let people = get_all_people(conn)?;
    let person_rows: Vec<PersonRow> = people
        .iter()
        .map(|p| PersonRow {
            first_name: &p.first_name,
            last_name: &p.last_name,
            email: &p.email,
            phone: &p.phone,
        })
        .collect();
    let persons = write_csv(&files.persons, &PERSON_HEADERS, &person_rows)?;

    let categories = get_all_categories(conn)?;
    let category_rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            name: &c.name,
            description: &c.description,
        })
        .collect();
    let categories = write_csv(&files.categories, &CATEGORY_HEADERS, &category_rows)?;

    let transactions = get_all_transactions(conn)?;
    let transaction_rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow {
            person_email: &t.person_email,
            person_full_name: t.person_full_name(),
            category_name: t.category_name.as_deref().unwrap_or(""),
            amount: t.amount.to_string(),
            date: t.date.format(DATE_FORMAT).to_string(),
            notes: &t.notes,
        })
        .collect();
    let transactions = write_csv(&files.transactions, &TRANSACTION_HEADERS, &transaction_rows)?;

    Ok(ExportSummary {
        persons,
        categories,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_categories, insert_people, insert_transactions, setup_database};
    use crate::entities::{NewCategory, NewPerson, NewTransaction};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_empty_store_writes_headers_only() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        let dir = TempDir::new().unwrap();
        let files = DataFiles::in_dir(dir.path());

        let summary = export_to_csv(&conn, &files).unwrap();

        assert_eq!(summary, ExportSummary::default());
        assert_eq!(
            fs::read_to_string(&files.persons).unwrap(),
            "First Name,Last Name,Email,Phone\n"
        );
        assert_eq!(
            fs::read_to_string(&files.categories).unwrap(),
            "Name,Description\n"
        );
        assert_eq!(
            fs::read_to_string(&files.transactions).unwrap(),
            "Person Email,Person Full Name,Category Name,Amount,Date,Notes\n"
        );
    }

    #[test]
    fn test_export_uses_natural_keys() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        insert_categories(&conn, &[NewCategory::new("Dining Out", "Category: Dining Out")])
            .unwrap();
        insert_people(
            &conn,
            &[NewPerson::new("Grace", "Miller", "grace@example.com", "+852-1234 5678")],
        )
        .unwrap();
        insert_transactions(
            &conn,
            &[
                NewTransaction {
                    person_id: 1,
                    category_id: Some(1),
                    amount: Decimal::new(4210, 2),
                    date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
                    notes: "dinner, with dessert".to_string(),
                },
                NewTransaction {
                    person_id: 1,
                    category_id: None,
                    amount: Decimal::new(1000, 2),
                    date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                    notes: String::new(),
                },
            ],
        )
        .unwrap();
        let dir = TempDir::new().unwrap();
        let files = DataFiles::in_dir(dir.path());

        let summary = export_to_csv(&conn, &files).unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                persons: 1,
                categories: 1,
                transactions: 2
            }
        );
        assert_eq!(
            fs::read_to_string(&files.transactions).unwrap(),
            "Person Email,Person Full Name,Category Name,Amount,Date,Notes\n\
             grace@example.com,Grace Miller,Dining Out,42.10,2025-02-14,\"dinner, with dessert\"\n\
             grace@example.com,Grace Miller,,10.00,2025-02-15,\n"
        );
        assert_eq!(
            fs::read_to_string(&files.persons).unwrap(),
            "First Name,Last Name,Email,Phone\nGrace,Miller,grace@example.com,+852-1234 5678\n"
        );
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        let dir = TempDir::new().unwrap();
        let files = DataFiles::in_dir(&dir.path().join("does-not-exist"));

        assert!(export_to_csv(&conn, &files).is_err());
    }
}
