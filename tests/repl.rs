//! End-to-end REPL sessions over the compiled binary, asserting the
//! exact stdout transcript, prompts included.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("test.db")
}

fn run_script(db: &Path, commands: &[&str]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sqlrite"))
        .arg(db)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sqlrite");

    {
        let stdin = child.stdin.as_mut().expect("failed to open stdin");
        for command in commands {
            writeln!(stdin, "{}", command).expect("failed to write to stdin");
        }
    }

    child.wait_with_output().expect("failed to wait for sqlrite")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout was not utf-8")
}

#[test]
fn inserts_and_retrieves_a_row() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &["INSERT 1 alice a@x", "SELECT", ".exit"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "SQLite > Executed\n\
         SQLite > ID: 1, Username: alice, Email: a@x\n\
         Executed\n\
         SQLite > Goodbye!\n"
    );
}

#[test]
fn select_on_fresh_database_prints_nothing_but_executed() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &["SELECT", ".exit"]);

    assert_eq!(
        stdout_of(&output),
        "SQLite > Executed\nSQLite > Goodbye!\n"
    );
}

#[test]
fn negative_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &["INSERT -7 bob b@x", ".exit"]);

    assert_eq!(
        stdout_of(&output),
        "SQLite > Negative ID. Could not insert.\nSQLite > Goodbye!\n"
    );
}

#[test]
fn overlong_strings_are_rejected_at_their_own_bounds() {
    let dir = TempDir::new().unwrap();
    let name33 = "n".repeat(33);
    let mail256 = "m".repeat(256);
    let output = run_script(
        &db_path(&dir),
        &[
            &format!("INSERT 1 {} c@x", name33),
            &format!("INSERT 1 carl {}", mail256),
            &format!("INSERT 1 {} {}", "n".repeat(32), "m".repeat(255)),
            ".exit",
        ],
    );

    assert_eq!(
        stdout_of(&output),
        "SQLite > String too long. Could not insert.\n\
         SQLite > String too long. Could not insert.\n\
         SQLite > Executed\n\
         SQLite > Goodbye!\n"
    );
}

#[test]
fn missing_insert_arguments_are_a_syntax_error() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &["INSERT 1 dan", ".exit"]);

    assert_eq!(
        stdout_of(&output),
        "SQLite > Syntax error. Could not parse command.\nSQLite > Goodbye!\n"
    );
}

#[test]
fn unknown_keyword_echoes_the_line() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &["FOO", ".exit"]);

    assert_eq!(
        stdout_of(&output),
        "SQLite > Unrecognized keyword in 'FOO'\nSQLite > Goodbye!\n"
    );
}

#[test]
fn unknown_meta_command_echoes_the_line() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &[".foo", ".exit"]);

    assert_eq!(
        stdout_of(&output),
        "SQLite > Unexpected Input: '.foo'\nSQLite > Goodbye!\n"
    );
}

#[test]
fn empty_line_is_unrecognized_input() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &["", ".exit"]);

    assert_eq!(
        stdout_of(&output),
        "SQLite > Unrecognized Input\nSQLite > Goodbye!\n"
    );
}

#[test]
fn end_of_input_prints_a_farewell_on_its_own_line() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &[]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "SQLite > \nGoodbye!\n");
}

#[test]
fn rows_persist_across_sessions_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let mut commands: Vec<String> = (1..=3)
        .map(|k| format!("INSERT {} user{} person{}@example.com", k, k, k))
        .collect();
    commands.push(".exit".to_string());
    let commands: Vec<&str> = commands.iter().map(|s| s.as_str()).collect();
    let output = run_script(&db, &commands);
    assert!(output.status.success());

    // One root page, written whole.
    assert_eq!(std::fs::metadata(&db).unwrap().len(), 4096);

    let output = run_script(&db, &["SELECT", ".exit"]);
    let mut expected = String::from("SQLite > ");
    for k in 1..=3 {
        expected.push_str(&format!(
            "ID: {}, Username: user{}, Email: person{}@example.com\n",
            k, k, k
        ));
    }
    expected.push_str("Executed\nSQLite > Goodbye!\n");
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn fourteenth_insert_reports_a_full_table_and_keeps_the_first_thirteen() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let mut commands: Vec<String> = (1..=14)
        .map(|k| format!("INSERT {} user{} person{}@example.com", k, k, k))
        .collect();
    commands.push(".exit".to_string());
    let commands: Vec<&str> = commands.iter().map(|s| s.as_str()).collect();
    let output = run_script(&db, &commands);

    let mut expected = String::new();
    for _ in 1..=13 {
        expected.push_str("SQLite > Executed\n");
    }
    expected.push_str("SQLite > Error: Table full.\n");
    expected.push_str("SQLite > Goodbye!\n");
    assert_eq!(stdout_of(&output), expected);

    let output = run_script(&db, &["SELECT", ".exit"]);
    let mut expected = String::from("SQLite > ");
    for k in 1..=13 {
        expected.push_str(&format!(
            "ID: {}, Username: user{}, Email: person{}@example.com\n",
            k, k, k
        ));
    }
    expected.push_str("Executed\nSQLite > Goodbye!\n");
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn constants_meta_command_prints_the_layout() {
    let dir = TempDir::new().unwrap();
    let output = run_script(&db_path(&dir), &[".constants", ".exit"]);

    assert_eq!(
        stdout_of(&output),
        "SQLite > ROW_SIZE : 293\n\
         COMMON_NODE_HEADER_SIZE : 6\n\
         LEAF_NODE_HEADER_SIZE : 10\n\
         LEAF_NODE_CELL_SIZE : 297\n\
         LEAF_NODE_SPACE_FOR_CELLS : 4086\n\
         LEAF_NODE_MAX_CELLS : 13\n\
         SQLite > Goodbye!\n"
    );
}

#[test]
fn btree_meta_command_lists_root_leaf_cells_in_arrival_order() {
    let dir = TempDir::new().unwrap();
    let output = run_script(
        &db_path(&dir),
        &[
            "INSERT 3 carol c@x",
            "INSERT 1 alice a@x",
            ".btree",
            ".exit",
        ],
    );

    assert_eq!(
        stdout_of(&output),
        "SQLite > Executed\n\
         SQLite > Executed\n\
         SQLite > Tree :\n\
         Leaf (Size : 2)\n\
         \x20 - 0 : 3\n\
         \x20 - 1 : 1\n\
         SQLite > Goodbye!\n"
    );
}

#[test]
fn missing_filename_is_reported_on_stderr() {
    let output = Command::new(env!("CARGO_BIN_EXE_sqlrite"))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run sqlrite");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Must provide a DB filename."));
}

#[test]
fn a_file_with_a_partial_page_is_rejected_as_corrupt() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);
    std::fs::write(&db, [0u8; 100]).unwrap();

    // The process refuses the file before reading any input.
    let output = run_script(&db, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not a whole number of pages"));
}
