// Ledger Tool - Core Library
// Exposes all modules for use in the CLI and integration tests

pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod generator;
pub mod import;
pub mod menu;
pub mod records;

// Re-export commonly used types
pub use commands::Operation;
pub use config::Config;
pub use db::{
    StoreCounts,
    open_database, setup_database, clear_all,
    insert_categories, insert_people, insert_transactions,
    get_or_create_category, get_or_create_person,
    find_category_by_name, find_person_by_email,
    get_all_categories, get_all_people, get_all_transactions,
    count_categories, count_people, count_transactions, store_counts,
};
pub use entities::{
    Category, NewCategory,
    Person, NewPerson,
    Transaction, NewTransaction,
};
pub use error::ImportError;
pub use export::{export_to_csv, ExportSummary};
pub use generator::{DataGenerator, GenerationSummary, GeneratorConfig};
pub use import::{import_from_csv, ImportSummary};
pub use menu::{confirm, run_menu, MenuChoice};
pub use records::{DataFiles, CATEGORIES_FILE, PERSONS_FILE, TRANSACTIONS_FILE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
