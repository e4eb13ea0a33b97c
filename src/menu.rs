// 🖥️ Console menu
//
// Numeric choice 1-5, destructive actions behind a y/N prompt.
// Generic over input/output so the loop can be driven from tests.

use crate::commands::Operation;
use crate::config::Config;
use anyhow::Result;
use rusqlite::Connection;
use std::io::{BufRead, Write};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Operation),
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Run(Operation::Clean)),
            "2" => Some(MenuChoice::Run(Operation::Generate)),
            "3" => Some(MenuChoice::Run(Operation::Export)),
            "4" => Some(MenuChoice::Run(Operation::Import)),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MENU_ORDER: [Operation; 4] = [
    Operation::Clean,
    Operation::Generate,
    Operation::Export,
    Operation::Import,
];

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Data Management Tool ---")?;
    for (i, op) in MENU_ORDER.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, op.label())?;
    }
    writeln!(out, "5. Exit")?;
    Ok(())
}

/// Print `prompt` and read one line. `None` at end of input.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Only "y" / "Y" confirms; anything else (including end of input) declines
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<bool> {
    let answer = read_answer(input, out, prompt)?;
    Ok(matches!(answer, Some(a) if a.eq_ignore_ascii_case("y")))
}

/// Run the menu until the user picks Exit or input ends. Operation failures
/// are reported and the loop goes on.
pub fn run_menu<R: BufRead, W: Write>(
    conn: &Connection,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        print_menu(out)?;

        let answer = match read_answer(input, out, "Choose an option (1-5): ")? {
            Some(answer) => answer,
            None => {
                writeln!(out)?;
                break;
            }
        };

        let op = match MenuChoice::parse(&answer) {
            Some(MenuChoice::Run(op)) => op,
            Some(MenuChoice::Exit) => break,
            None => {
                writeln!(out, "Invalid choice, please enter a number from 1 to 5.")?;
                continue;
            }
        };

        if let Some(prompt) = op.confirmation_prompt() {
            if !confirm(input, out, prompt)? {
                writeln!(out, "Operation cancelled.")?;
                continue;
            }
        }

        if let Err(e) = op.run(conn, config, out) {
            error!("{} failed: {:#}", op.label(), e);
            writeln!(out, "❌ Error: {:#}", e)?;
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{setup_database, store_counts};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn drive(conn: &Connection, config: &Config, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_menu(conn, config, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn setup() -> (Connection, Config, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("unused.db"), dir.path());
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        (conn, config, dir)
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Run(Operation::Clean)));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Run(Operation::Import)));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("clean"), None);
    }

    #[test]
    fn test_invalid_choice_loops_then_exit() {
        let (conn, config, _dir) = setup();

        let text = drive(&conn, &config, "9\n5\n");

        assert!(text.contains("Invalid choice"));
        assert!(text.ends_with("Goodbye!\n"));
        assert_eq!(text.matches("--- Data Management Tool ---").count(), 2);
    }

    #[test]
    fn test_confirmed_generate_then_declined_clean() {
        let (conn, config, _dir) = setup();

        let text = drive(&conn, &config, "2\ny\n1\nn\n5\n");

        assert!(text.contains("Operation cancelled."));
        let counts = store_counts(&conn).unwrap();
        assert_eq!(counts.people, 20);
        assert_eq!(counts.transactions, 25);
    }

    #[test]
    fn test_uppercase_y_confirms_clean() {
        let (conn, config, _dir) = setup();

        drive(&conn, &config, "2\ny\n1\nY\n5\n");

        assert!(store_counts(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_failed_import_keeps_menu_running() {
        let (conn, config, _dir) = setup();

        let text = drive(&conn, &config, "4\ny\n3\n5\n");

        assert!(text.contains("❌ Error: file not found"));
        assert!(text.contains("Exported to"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (conn, config, _dir) = setup();

        let text = drive(&conn, &config, "");

        assert!(text.ends_with("Goodbye!\n"));
    }
}
