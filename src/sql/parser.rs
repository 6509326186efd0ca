use super::statement::{PrepareError, Statement};
use crate::storage::row::{Row, EMAIL_MAX, USERNAME_MAX};
use std::str::SplitWhitespace;

/// Turns one input line into a [`Statement`].
///
/// Keywords are matched case-sensitively on the first whitespace-split
/// token; everything unknown is reported back with the offending line.
pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
    let mut tokens = input.split_whitespace();
    match tokens.next() {
        Some("SELECT") => Ok(Statement::Select),
        Some("INSERT") => prepare_insert(tokens),
        _ => Err(PrepareError::Unrecognized(input.to_string())),
    }
}

/// `INSERT <id> <username> <email>`. Tokens past the email are ignored.
fn prepare_insert(mut tokens: SplitWhitespace) -> Result<Statement, PrepareError> {
    let id = tokens.next().ok_or(PrepareError::Syntax)?;
    let username = tokens.next().ok_or(PrepareError::Syntax)?;
    let email = tokens.next().ok_or(PrepareError::Syntax)?;

    // Parsed as i64 so a negative id is reported as such instead of
    // falling out as a syntax error.
    let id: i64 = id.parse().map_err(|_| PrepareError::Syntax)?;
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }

    if username.len() > USERNAME_MAX || email.len() > EMAIL_MAX {
        return Err(PrepareError::StringTooLong);
    }

    Ok(Statement::Insert(Row::new(id as u32, username, email)))
}
