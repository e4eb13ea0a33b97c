// 💸 Transaction Entity
// Owned by exactly one person, optionally filed under one category.
// Amount is a Decimal (never f64) so exported values reload exactly.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Transaction as read back from the store, joined with the natural keys of
/// the records it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,

    // ========================================================================
    // OWNER (required)
    // ========================================================================
    pub person_id: i64,
    pub person_email: String,
    pub person_first_name: String,
    pub person_last_name: String,

    // ========================================================================
    // CATEGORY (optional)
    // ========================================================================
    pub category_id: Option<i64>,
    pub category_name: Option<String>,

    // ========================================================================
    // VALUES
    // ========================================================================
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: String,
}

impl Transaction {
    pub fn person_full_name(&self) -> String {
        format!("{} {}", self.person_first_name, self.person_last_name)
    }

    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }
}

/// Transaction waiting to be inserted; references are surrogate ids that
/// must already exist in the same store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub person_id: i64,
    pub category_id: Option<i64>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: String,
}
