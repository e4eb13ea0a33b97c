use anyhow::Result;
use clap::{Parser, Subcommand};
use ledger_tool::config::{DEFAULT_DATA_DIR, DEFAULT_DB_PATH};
use ledger_tool::{confirm, run_menu, Config, Operation};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ledger-tool",
    version,
    about = "Clean, generate, export and import people/categories/transactions"
)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "LEDGER_DB", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Directory holding the exported_*.csv files
    #[arg(long, env = "LEDGER_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive numeric menu (default)
    Menu,

    /// Delete all records
    Clean {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Replace all records with random sample data
    Generate {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Write the three CSV files
    Export,

    /// Clear the store and reload it from the three CSV files
    Import {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::new(cli.db, cli.data_dir);
    let conn = config.open_database()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let (op, yes) = match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => return run_menu(&conn, &config, &mut input, &mut out),
        Command::Clean { yes } => (Operation::Clean, yes),
        Command::Generate { yes } => (Operation::Generate, yes),
        Command::Export => (Operation::Export, true),
        Command::Import { yes } => (Operation::Import, yes),
    };

    if let Some(prompt) = op.confirmation_prompt() {
        if !yes && !confirm(&mut input, &mut out, prompt)? {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    if let Err(e) = op.run(&conn, &config, &mut out) {
        eprintln!("❌ {}: {:#}", op.label(), e);
        std::process::exit(1);
    }

    Ok(())
}
