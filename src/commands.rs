// The four store operations, as run from the menu or a one-shot subcommand.
// Each one reports its result to `out` in the console style of the tool.

use crate::config::Config;
use crate::db::clear_all;
use crate::export::export_to_csv;
use crate::generator::DataGenerator;
use crate::import::import_from_csv;
use crate::records::{CATEGORIES_FILE, PERSONS_FILE, TRANSACTIONS_FILE};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Clean,
    Generate,
    Export,
    Import,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Clean => "Clean database",
            Operation::Generate => "Generate sample data",
            Operation::Export => "Export data to CSV",
            Operation::Import => "Import data from CSV (clears existing data first)",
        }
    }

    /// Operations that wipe existing records
    pub fn is_destructive(&self) -> bool {
        !matches!(self, Operation::Export)
    }

    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            Operation::Clean => {
                Some("This will delete ALL data in the database. Continue? (y/N): ")
            }
            Operation::Generate => {
                Some("This will replace ALL data with generated samples. Continue? (y/N): ")
            }
            Operation::Import => {
                Some("This will clear existing data and import from CSV. Continue? (y/N): ")
            }
            Operation::Export => None,
        }
    }

    pub fn run<W: Write>(&self, conn: &Connection, config: &Config, out: &mut W) -> Result<()> {
        match self {
            Operation::Clean => clean(conn, out),
            Operation::Generate => generate(conn, out),
            Operation::Export => export(conn, config, out),
            Operation::Import => import(conn, config, out),
        }
    }
}

fn clean<W: Write>(conn: &Connection, out: &mut W) -> Result<()> {
    writeln!(out, "🧹 Cleaning database...")?;
    let removed = clear_all(conn)?;
    writeln!(
        out,
        "✅ Database cleaned ({} transactions, {} people, {} categories removed)",
        removed.transactions, removed.people, removed.categories
    )?;
    Ok(())
}

fn generate<W: Write>(conn: &Connection, out: &mut W) -> Result<()> {
    writeln!(out, "🎲 Generating sample data...")?;
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();
    let summary = DataGenerator::with_defaults().populate(conn, &mut rng, today)?;
    writeln!(
        out,
        "✅ Generated {} people, {} categories, {} transactions",
        summary.people, summary.categories, summary.transactions
    )?;
    Ok(())
}

fn export<W: Write>(conn: &Connection, config: &Config, out: &mut W) -> Result<()> {
    writeln!(out, "📤 Exporting data to CSV...")?;
    let summary = export_to_csv(conn, &config.data_files())?;
    writeln!(
        out,
        "✅ Exported to {}: {} ({}), {} ({}), {} ({})",
        config.data_dir.display(),
        PERSONS_FILE,
        summary.persons,
        CATEGORIES_FILE,
        summary.categories,
        TRANSACTIONS_FILE,
        summary.transactions
    )?;
    Ok(())
}

fn import<W: Write>(conn: &Connection, config: &Config, out: &mut W) -> Result<()> {
    writeln!(out, "📥 Importing data from CSV...")?;
    let summary = import_from_csv(conn, &config.data_files())?;

    for skipped in &summary.skipped {
        writeln!(out, "⚠️  {}, row skipped", skipped)?;
    }
    writeln!(
        out,
        "✅ Imported {} categories ({} already present), {} people ({} already present), {} transactions",
        summary.categories_created,
        summary.categories_reused,
        summary.people_created,
        summary.people_reused,
        summary.transactions_inserted
    )?;
    if !summary.skipped.is_empty() {
        writeln!(out, "   Skipped rows: {}", summary.skipped_count())?;
    }
    Ok(())
}
