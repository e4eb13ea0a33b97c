// 📄 CSV file layout shared by export and import
//
// Three flat files, comma separated, header row mandatory. Only natural keys
// (person email, category name) appear; surrogate ids never leave the store.

use serde::Serialize;
use std::path::{Path, PathBuf};

pub const PERSONS_FILE: &str = "exported_persons.csv";
pub const CATEGORIES_FILE: &str = "exported_categories.csv";
pub const TRANSACTIONS_FILE: &str = "exported_transactions.csv";

// ============================================================================
// COLUMN NAMES
// ============================================================================

pub const COL_FIRST_NAME: &str = "First Name";
pub const COL_LAST_NAME: &str = "Last Name";
pub const COL_EMAIL: &str = "Email";
pub const COL_PHONE: &str = "Phone";

pub const COL_NAME: &str = "Name";
pub const COL_DESCRIPTION: &str = "Description";

pub const COL_PERSON_EMAIL: &str = "Person Email";
pub const COL_PERSON_FULL_NAME: &str = "Person Full Name";
pub const COL_CATEGORY_NAME: &str = "Category Name";
pub const COL_AMOUNT: &str = "Amount";
pub const COL_DATE: &str = "Date";
pub const COL_NOTES: &str = "Notes";

pub const PERSON_HEADERS: [&str; 4] = [COL_FIRST_NAME, COL_LAST_NAME, COL_EMAIL, COL_PHONE];
pub const CATEGORY_HEADERS: [&str; 2] = [COL_NAME, COL_DESCRIPTION];
pub const TRANSACTION_HEADERS: [&str; 6] = [
    COL_PERSON_EMAIL,
    COL_PERSON_FULL_NAME,
    COL_CATEGORY_NAME,
    COL_AMOUNT,
    COL_DATE,
    COL_NOTES,
];

// ============================================================================
// ROWS (field order must match the header arrays above)
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PersonRow<'a> {
    #[serde(rename = "First Name")]
    pub first_name: &'a str,

    #[serde(rename = "Last Name")]
    pub last_name: &'a str,

    #[serde(rename = "Email")]
    pub email: &'a str,

    #[serde(rename = "Phone")]
    pub phone: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CategoryRow<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,

    #[serde(rename = "Description")]
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TransactionRow<'a> {
    #[serde(rename = "Person Email")]
    pub person_email: &'a str,

    /// Informational only, ignored on import
    #[serde(rename = "Person Full Name")]
    pub person_full_name: String,

    /// Empty for uncategorized transactions
    #[serde(rename = "Category Name")]
    pub category_name: &'a str,

    #[serde(rename = "Amount")]
    pub amount: String,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Notes")]
    pub notes: &'a str,
}

// ============================================================================
// FILE SET
// ============================================================================

/// Locations of the three exchange files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub persons: PathBuf,
    pub categories: PathBuf,
    pub transactions: PathBuf,
}

impl DataFiles {
    pub fn in_dir(dir: &Path) -> Self {
        DataFiles {
            persons: dir.join(PERSONS_FILE),
            categories: dir.join(CATEGORIES_FILE),
            transactions: dir.join(TRANSACTIONS_FILE),
        }
    }

    /// Import reading order: categories, persons, transactions
    pub fn all(&self) -> [&Path; 3] {
        [&self.categories, &self.persons, &self.transactions]
    }
}

/// File name for log and error messages
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
