//! The REPL driver: prompt, read a line, dispatch, print the result.
//!
//! Standard output carries the session protocol; diagnostics for the
//! user go there too. Only fatal storage errors leave this loop, and
//! they do so by propagating to `main`.

pub mod history;

use crate::command::{self, ExecuteResult};
use crate::errors::Error;
use crate::sql;
use crate::storage::btree::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS,
};
use crate::storage::row::ROW_SIZE;
use crate::storage::table::Table;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

const PROMPT: &str = "SQLite > ";

/// Runs the session loop against the database at `path` until `.exit`
/// or end of input. Every way out of the loop closes the table exactly
/// once, except fatal storage errors, which leave the file as it was
/// last persisted.
pub fn run(path: &Path) -> Result<(), Error> {
    let mut table = Table::open(path)?;
    info!(path = %path.display(), "Starting REPL session");

    let history_path = history::history_path();
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // End of input: same farewell as .exit, on a fresh line.
                println!();
                println!("Goodbye!");
                table.close()?;
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => {
                table.close()?;
                return Err(Error::Io(e));
            }
        }

        let line = input.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            println!("Unrecognized Input");
            continue;
        }

        if let Some(p) = &history_path {
            if let Err(e) = history::append(line, p) {
                warn!("Failed to save history. {}", e);
            }
        }

        if line.starts_with('.') {
            match line {
                ".exit" => {
                    table.close()?;
                    println!("Goodbye!");
                    return Ok(());
                }
                ".btree" => print_tree(&mut table)?,
                ".constants" => print_constants(),
                _ => println!("Unexpected Input: '{}'", line),
            }
            continue;
        }

        match sql::prepare(line) {
            Ok(statement) => match command::execute(&mut table, statement)? {
                ExecuteResult::Success => println!("Executed"),
                ExecuteResult::Rows(rows) => {
                    for row in rows {
                        println!("{}", row);
                    }
                    println!("Executed");
                }
                ExecuteResult::TableFull => println!("Error: Table full."),
            },
            Err(e) => println!("{}", e),
        }
    }
}

fn print_tree(table: &mut Table) -> Result<(), Error> {
    let keys = table.root_keys()?;
    println!("Tree :");
    println!("Leaf (Size : {})", keys.len());
    for (i, key) in keys.iter().enumerate() {
        println!("  - {} : {}", i, key);
    }
    Ok(())
}

fn print_constants() {
    println!("ROW_SIZE : {}", ROW_SIZE);
    println!("COMMON_NODE_HEADER_SIZE : {}", COMMON_NODE_HEADER_SIZE);
    println!("LEAF_NODE_HEADER_SIZE : {}", LEAF_NODE_HEADER_SIZE);
    println!("LEAF_NODE_CELL_SIZE : {}", LEAF_NODE_CELL_SIZE);
    println!("LEAF_NODE_SPACE_FOR_CELLS : {}", LEAF_NODE_SPACE_FOR_CELLS);
    println!("LEAF_NODE_MAX_CELLS : {}", LEAF_NODE_MAX_CELLS);
}
