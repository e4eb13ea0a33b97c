// Runtime configuration: where the database lives and where the CSV files go.
// Filled from command-line flags / environment in main.rs.

use crate::db::open_database;
use crate::records::DataFiles;
use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "ledger.db";
pub const DEFAULT_DATA_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Config {
    pub fn new(db_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Config {
            db_path: db_path.into(),
            data_dir: data_dir.into(),
        }
    }

    pub fn data_files(&self) -> DataFiles {
        DataFiles::in_dir(&self.data_dir)
    }

    /// Open the configured database, creating the schema when needed
    pub fn open_database(&self) -> Result<Connection> {
        open_database(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store_counts;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let config = Config::default();

        assert_eq!(config.db_path, PathBuf::from("ledger.db"));
        assert_eq!(
            config.data_files().transactions,
            PathBuf::from("./exported_transactions.csv")
        );
    }

    #[test]
    fn test_open_database_creates_schema() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("ledger.db"), dir.path());

        let conn = config.open_database().unwrap();

        assert!(store_counts(&conn).unwrap().is_empty());
        assert!(config.db_path.exists());
    }
}
