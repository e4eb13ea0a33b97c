// 📥 Importer - three CSV files → store, reconciled by natural key
//
// Order matters:
//   0. all three files must exist (otherwise nothing is touched)
//   1. clear the store (transactions first)
//   2. categories: get-or-create by name   → name  → Category
//   3. people:     get-or-create by email  → email → Person
//   4. transactions: resolve both maps, queue, bulk insert once
//
// Row problems (missing column, unknown reference, bad value) skip the row
// and are reported in the summary. Earlier phases are never rolled back.

use crate::db::{
    clear_all, get_or_create_category, get_or_create_person, insert_transactions, DATE_FORMAT,
};
use crate::entities::{Category, NewPerson, NewTransaction, Person};
use crate::error::ImportError;
use crate::records::{
    display_name, DataFiles, COL_AMOUNT, COL_CATEGORY_NAME, COL_DATE, COL_DESCRIPTION, COL_EMAIL,
    COL_FIRST_NAME, COL_LAST_NAME, COL_NAME, COL_NOTES, COL_PERSON_EMAIL, COL_PHONE,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub categories_created: usize,
    pub categories_reused: usize,
    pub people_created: usize,
    pub people_reused: usize,
    pub transactions_inserted: usize,
    /// Every row that was left out, in file order
    pub skipped: Vec<ImportError>,
}

impl ImportSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    fn skip(&mut self, err: ImportError) {
        warn!("{}, skipping row", err);
        self.skipped.push(err);
    }
}

// ============================================================================
// CSV ACCESS BY HEADER NAME
// ============================================================================

/// One open CSV file plus its header row, so columns are looked up by name
/// and a missing column costs only the current row.
struct CsvTable {
    file: String,
    headers: StringRecord,
    reader: csv::Reader<std::fs::File>,
}

impl CsvTable {
    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ImportError::MissingFile(path.to_path_buf()).into());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .clone();

        let file = display_name(path);
        debug!(file = %file, headers = ?headers.iter().collect::<Vec<_>>(), "CSV headers");

        Ok(CsvTable {
            file,
            headers,
            reader,
        })
    }

    /// Read all data rows. A row the reader cannot decode becomes an error
    /// entry instead of stopping the whole file.
    fn rows(&mut self) -> Vec<std::result::Result<Row, ImportError>> {
        let file = self.file.clone();
        let headers = self.headers.clone();

        self.reader
            .records()
            .map(|result| match result {
                Ok(record) => Ok(Row {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    file: file.clone(),
                    headers: headers.clone(),
                    record,
                }),
                Err(e) => Err(ImportError::MalformedRow {
                    file: file.clone(),
                    line: e.position().map(|p| p.line()).unwrap_or(0),
                    reason: e.to_string(),
                }),
            })
            .collect()
    }
}

struct Row {
    file: String,
    line: u64,
    headers: StringRecord,
    record: StringRecord,
}

impl Row {
    fn get(&self, column: &'static str) -> std::result::Result<&str, ImportError> {
        self.headers
            .iter()
            .position(|h| h.trim() == column)
            .and_then(|idx| self.record.get(idx))
            .ok_or_else(|| ImportError::MissingColumn {
                file: self.file.clone(),
                line: self.line,
                column,
            })
    }

    /// Natural keys may not be blank
    fn key(&self, column: &'static str) -> std::result::Result<&str, ImportError> {
        let value = self.get(column)?;
        if value.trim().is_empty() {
            return Err(self.invalid(column, value));
        }
        Ok(value)
    }

    fn invalid(&self, column: &'static str, value: &str) -> ImportError {
        ImportError::InvalidValue {
            file: self.file.clone(),
            line: self.line,
            column,
            value: value.to_string(),
        }
    }
}

// ============================================================================
// IMPORT
// ============================================================================

pub fn import_from_csv(conn: &Connection, files: &DataFiles) -> Result<ImportSummary> {
    // 0. Pre-flight: a missing file aborts before the store is touched
    for path in files.all() {
        if !path.exists() {
            return Err(ImportError::MissingFile(path.to_path_buf()).into());
        }
    }

    // 1. Clear
    clear_all(conn)?;

    let mut summary = ImportSummary::default();

    // 2. Categories
    let categories = import_categories(conn, &files.categories, &mut summary)?;
    info!(
        created = summary.categories_created,
        reused = summary.categories_reused,
        "categories imported"
    );

    // 3. People
    let people = import_people(conn, &files.persons, &mut summary)?;
    info!(
        created = summary.people_created,
        reused = summary.people_reused,
        "people imported"
    );

    // 4. Transactions
    import_transactions(conn, &files.transactions, &categories, &people, &mut summary)?;
    info!(
        inserted = summary.transactions_inserted,
        skipped = summary.skipped_count(),
        "transactions imported"
    );

    Ok(summary)
}

fn import_categories(
    conn: &Connection,
    path: &Path,
    summary: &mut ImportSummary,
) -> Result<HashMap<String, Category>> {
    let mut table = CsvTable::open(path)?;
    let mut by_name = HashMap::new();

    for row in table.rows() {
        let parsed = row.and_then(|row| {
            let name = row.key(COL_NAME)?.to_string();
            let description = row.get(COL_DESCRIPTION)?.to_string();
            Ok((name, description))
        });

        let (name, description) = match parsed {
            Ok(fields) => fields,
            Err(e) => {
                summary.skip(e);
                continue;
            }
        };

        let (category, created) = get_or_create_category(conn, &name, &description)?;
        if created {
            summary.categories_created += 1;
        } else {
            summary.categories_reused += 1;
        }
        by_name.insert(name, category);
    }

    Ok(by_name)
}

fn import_people(
    conn: &Connection,
    path: &Path,
    summary: &mut ImportSummary,
) -> Result<HashMap<String, Person>> {
    let mut table = CsvTable::open(path)?;
    let mut by_email = HashMap::new();

    for row in table.rows() {
        let parsed = row.and_then(|row| {
            Ok(NewPerson::new(
                row.get(COL_FIRST_NAME)?,
                row.get(COL_LAST_NAME)?,
                row.key(COL_EMAIL)?,
                row.get(COL_PHONE)?,
            ))
        });

        let new_person = match parsed {
            Ok(person) => person,
            Err(e) => {
                summary.skip(e);
                continue;
            }
        };

        let (person, created) = get_or_create_person(conn, &new_person)?;
        if created {
            summary.people_created += 1;
        } else {
            summary.people_reused += 1;
        }
        by_email.insert(new_person.email, person);
    }

    Ok(by_email)
}

/// Resolve one transactions row against the maps built in phases 2 and 3
fn resolve_transaction(
    row: &Row,
    categories: &HashMap<String, Category>,
    people: &HashMap<String, Person>,
) -> std::result::Result<NewTransaction, ImportError> {
    let email = row.get(COL_PERSON_EMAIL)?;
    let person = people
        .get(email)
        .ok_or_else(|| ImportError::UnresolvedPerson {
            file: row.file.clone(),
            line: row.line,
            email: email.to_string(),
        })?;

    // Empty category name means "uncategorized", not "unknown"
    let category_name = row.get(COL_CATEGORY_NAME)?;
    let category_id = if category_name.is_empty() {
        None
    } else {
        let category = categories
            .get(category_name)
            .ok_or_else(|| ImportError::UnresolvedCategory {
                file: row.file.clone(),
                line: row.line,
                name: category_name.to_string(),
            })?;
        Some(category.id)
    };

    let amount_str = row.get(COL_AMOUNT)?;
    let amount =
        Decimal::from_str(amount_str.trim()).map_err(|_| row.invalid(COL_AMOUNT, amount_str))?;

    let date_str = row.get(COL_DATE)?;
    let date = NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
        .map_err(|_| row.invalid(COL_DATE, date_str))?;

    let notes = row.get(COL_NOTES)?.to_string();

    Ok(NewTransaction {
        person_id: person.id,
        category_id,
        amount,
        date,
        notes,
    })
}

fn import_transactions(
    conn: &Connection,
    path: &Path,
    categories: &HashMap<String, Category>,
    people: &HashMap<String, Person>,
    summary: &mut ImportSummary,
) -> Result<()> {
    let mut table = CsvTable::open(path)?;
    let mut queue = Vec::new();

    for row in table.rows() {
        match row.and_then(|row| resolve_transaction(&row, categories, people)) {
            Ok(transaction) => queue.push(transaction),
            Err(e) => summary.skip(e),
        }
    }

    if !queue.is_empty() {
        summary.transactions_inserted = insert_transactions(conn, &queue)?;
    }

    Ok(())
}
