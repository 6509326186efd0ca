//! Statement execution against an open table.

use crate::errors::Error;
use crate::sql::Statement;
use crate::storage::btree::{Node, LEAF_NODE_MAX_CELLS};
use crate::storage::cursor::Cursor;
use crate::storage::row::Row;
use crate::storage::table::Table;
use tracing::debug;

/// Outcome of running a statement. `TableFull` is a result, not an
/// error; the REPL reports it and carries on.
#[derive(Debug)]
pub enum ExecuteResult {
    Success,
    Rows(Vec<Row>),
    TableFull,
}

pub fn execute(table: &mut Table, statement: Statement) -> Result<ExecuteResult, Error> {
    match statement {
        Statement::Insert(row) => execute_insert(table, row),
        Statement::Select => execute_select(table),
    }
}

fn execute_insert(table: &mut Table, row: Row) -> Result<ExecuteResult, Error> {
    {
        let page = table.pager.get_page(table.root_page_num)?;
        let num_cells = Node::new(page).leaf_node_num_cells()?;
        if num_cells >= LEAF_NODE_MAX_CELLS as u32 {
            return Ok(ExecuteResult::TableFull);
        }
    }

    let key = row.id;
    let mut cursor = Cursor::end(table)?;
    cursor.insert(key, &row)?;

    debug!(id = key, "Executed insert");
    Ok(ExecuteResult::Success)
}

fn execute_select(table: &mut Table) -> Result<ExecuteResult, Error> {
    let mut rows = Vec::new();

    let mut cursor = Cursor::start(table)?;
    while !cursor.end_of_table {
        rows.push(cursor.read_row()?);
        cursor.advance()?;
    }

    debug!(rows = rows.len(), "Executed select");
    Ok(ExecuteResult::Rows(rows))
}
