use crate::entities::{Category, NewCategory, NewPerson, NewTransaction, Person, Transaction};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Date format used in the store and in exported files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub categories: usize,
    pub people: usize,
    pub transactions: usize,
}

impl StoreCounts {
    pub fn is_empty(&self) -> bool {
        self.categories == 0 && self.people == 0 && self.transactions == 0
    }
}

/// Open (or create) the database file and make sure the schema exists
pub fn open_database(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // References are enforced by SQLite, not by callers
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // ==========================================================================
    // Categories (natural key: name)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )",
        [],
    )?;

    // ==========================================================================
    // People (natural key: email)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            phone TEXT NOT NULL DEFAULT ''
        )",
        [],
    )?;

    // ==========================================================================
    // Transactions (amount kept as TEXT so decimals survive untouched)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL REFERENCES people(id),
            category_id INTEGER REFERENCES categories(id),
            amount TEXT NOT NULL,
            date TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_person ON transactions(person_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// CLEAR
// ============================================================================

/// Delete every record. Transactions go first, they reference the other two.
/// Returns how many rows each table lost.
pub fn clear_all(conn: &Connection) -> Result<StoreCounts> {
    let tx = conn.unchecked_transaction()?;

    let transactions = tx.execute("DELETE FROM transactions", [])?;
    let people = tx.execute("DELETE FROM people", [])?;
    let categories = tx.execute("DELETE FROM categories", [])?;

    tx.commit().context("Failed to clear database")?;

    let removed = StoreCounts {
        categories,
        people,
        transactions,
    };
    info!(
        transactions = removed.transactions,
        people = removed.people,
        categories = removed.categories,
        "database cleared"
    );

    Ok(removed)
}

// ============================================================================
// BULK INSERT (one SQL transaction per batch, all or nothing)
// ============================================================================

pub fn insert_categories(conn: &Connection, categories: &[NewCategory]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO categories (name, description) VALUES (?1, ?2)")?;
        for category in categories {
            stmt.execute(params![category.name, category.description])
                .with_context(|| format!("Failed to insert category '{}'", category.name))?;
        }
    }
    tx.commit()?;

    debug!(count = categories.len(), "categories inserted");
    Ok(categories.len())
}

pub fn insert_people(conn: &Connection, people: &[NewPerson]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO people (first_name, last_name, email, phone) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for person in people {
            stmt.execute(params![
                person.first_name,
                person.last_name,
                person.email,
                person.phone,
            ])
            .with_context(|| format!("Failed to insert person '{}'", person.email))?;
        }
    }
    tx.commit()?;

    debug!(count = people.len(), "people inserted");
    Ok(people.len())
}

pub fn insert_transactions(conn: &Connection, transactions: &[NewTransaction]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions (person_id, category_id, amount, date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for t in transactions {
            stmt.execute(params![
                t.person_id,
                t.category_id,
                t.amount.to_string(),
                t.date.format(DATE_FORMAT).to_string(),
                t.notes,
            ])
            .context("Failed to insert transaction")?;
        }
    }
    tx.commit()?;

    debug!(count = transactions.len(), "transactions inserted");
    Ok(transactions.len())
}

// ============================================================================
// GET-OR-CREATE (lookup by natural key, never updates an existing record)
// ============================================================================

pub fn find_category_by_name(conn: &Connection, name: &str) -> Result<Option<Category>> {
    let category = conn
        .query_row(
            "SELECT id, name, description FROM categories WHERE name = ?1",
            [name],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            },
        )
        .optional()?;

    Ok(category)
}

/// Returns the category and whether it was created by this call
pub fn get_or_create_category(
    conn: &Connection,
    name: &str,
    description: &str,
) -> Result<(Category, bool)> {
    if let Some(existing) = find_category_by_name(conn, name)? {
        return Ok((existing, false));
    }

    conn.execute(
        "INSERT INTO categories (name, description) VALUES (?1, ?2)",
        params![name, description],
    )
    .with_context(|| format!("Failed to create category '{}'", name))?;

    let category = Category {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
    };
    Ok((category, true))
}

pub fn find_person_by_email(conn: &Connection, email: &str) -> Result<Option<Person>> {
    let person = conn
        .query_row(
            "SELECT id, first_name, last_name, email, phone FROM people WHERE email = ?1",
            [email],
            |row| {
                Ok(Person {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    email: row.get(3)?,
                    phone: row.get(4)?,
                })
            },
        )
        .optional()?;

    Ok(person)
}

/// Returns the person and whether it was created by this call
pub fn get_or_create_person(conn: &Connection, new: &NewPerson) -> Result<(Person, bool)> {
    if let Some(existing) = find_person_by_email(conn, &new.email)? {
        return Ok((existing, false));
    }

    conn.execute(
        "INSERT INTO people (first_name, last_name, email, phone) VALUES (?1, ?2, ?3, ?4)",
        params![new.first_name, new.last_name, new.email, new.phone],
    )
    .with_context(|| format!("Failed to create person '{}'", new.email))?;

    let person = Person {
        id: conn.last_insert_rowid(),
        first_name: new.first_name.clone(),
        last_name: new.last_name.clone(),
        email: new.email.clone(),
        phone: new.phone.clone(),
    };
    Ok((person, true))
}

// ============================================================================
// LISTING (insertion order)
// ============================================================================

pub fn get_all_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM categories ORDER BY id")?;

    let categories = stmt
        .query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(categories)
}

pub fn get_all_people(conn: &Connection) -> Result<Vec<Person>> {
    let mut stmt =
        conn.prepare("SELECT id, first_name, last_name, email, phone FROM people ORDER BY id")?;

    let people = stmt
        .query_map([], |row| {
            Ok(Person {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                email: row.get(3)?,
                phone: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(people)
}

pub fn get_all_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.person_id, p.email, p.first_name, p.last_name,
                t.category_id, c.name, t.amount, t.date, t.notes
         FROM transactions t
         JOIN people p ON p.id = t.person_id
         LEFT JOIN categories c ON c.id = t.category_id
         ORDER BY t.id",
    )?;

    let transactions = stmt
        .query_map([], |row| {
            let amount_str: String = row.get(7)?;
            let date_str: String = row.get(8)?;

            let amount = Decimal::from_str(&amount_str)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;
            let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e)))?;

            Ok(Transaction {
                id: row.get(0)?,
                person_id: row.get(1)?,
                person_email: row.get(2)?,
                person_first_name: row.get(3)?,
                person_last_name: row.get(4)?,
                category_id: row.get(5)?,
                category_name: row.get(6)?,
                amount,
                date,
                notes: row.get(9)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

// ============================================================================
// COUNTS
// ============================================================================

fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;

    Ok(count as usize)
}

pub fn count_categories(conn: &Connection) -> Result<usize> {
    count_rows(conn, "categories")
}

pub fn count_people(conn: &Connection) -> Result<usize> {
    count_rows(conn, "people")
}

pub fn count_transactions(conn: &Connection) -> Result<usize> {
    count_rows(conn, "transactions")
}

pub fn store_counts(conn: &Connection) -> Result<StoreCounts> {
    Ok(StoreCounts {
        categories: count_categories(conn)?,
        people: count_people(conn)?,
        transactions: count_transactions(conn)?,
    })
}
