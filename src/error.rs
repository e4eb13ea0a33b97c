// Typed errors for the CSV reconciliation.
// `MissingFile` aborts an import; every other variant only costs one row.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{file} line {line}: missing column '{column}'")]
    MissingColumn {
        file: String,
        line: u64,
        column: &'static str,
    },

    #[error("{file} line {line}: unreadable row ({reason})")]
    MalformedRow {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("{file} line {line}: person email '{email}' not found")]
    UnresolvedPerson { file: String, line: u64, email: String },

    #[error("{file} line {line}: category name '{name}' not found")]
    UnresolvedCategory { file: String, line: u64, name: String },

    #[error("{file} line {line}: invalid {column} '{value}'")]
    InvalidValue {
        file: String,
        line: u64,
        column: &'static str,
        value: String,
    },
}

impl ImportError {
    /// True when the whole import has to stop
    pub fn is_fatal(&self) -> bool {
        matches!(self, ImportError::MissingFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_file_is_fatal() {
        assert!(ImportError::MissingFile(PathBuf::from("exported_persons.csv")).is_fatal());
        assert!(!ImportError::UnresolvedPerson {
            file: "exported_transactions.csv".to_string(),
            line: 3,
            email: "nobody@example.com".to_string(),
        }
        .is_fatal());
    }

    #[test]
    fn test_messages_name_the_offending_key() {
        let err = ImportError::UnresolvedCategory {
            file: "exported_transactions.csv".to_string(),
            line: 5,
            name: "Yachts".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "exported_transactions.csv line 5: category name 'Yachts' not found"
        );
    }
}
