use crate::storage::row::Row;
use std::fmt;

/// A statement the executor knows how to run.
#[derive(Debug, PartialEq)]
pub enum Statement {
    /// Append one row to the table.
    Insert(Row),
    /// Walk the table and return every row.
    Select,
}

/// Why a line could not be turned into a [`Statement`]. These are user
/// errors; the REPL prints them and keeps going.
#[derive(Debug, PartialEq)]
pub enum PrepareError {
    /// Missing tokens, or an id that is not an integer.
    Syntax,
    /// A username or email longer than its column.
    StringTooLong,
    /// An id below zero.
    NegativeId,
    /// The line does not start with a known keyword.
    Unrecognized(String),
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrepareError::Syntax => write!(f, "Syntax error. Could not parse command."),
            PrepareError::StringTooLong => write!(f, "String too long. Could not insert."),
            PrepareError::NegativeId => write!(f, "Negative ID. Could not insert."),
            PrepareError::Unrecognized(line) => {
                write!(f, "Unrecognized keyword in '{}'", line)
            }
        }
    }
}
