//! Cursor-based navigation over the table, pointing at one
//! (page, cell) position at a time.

use crate::err;
use crate::errors::Error;
use crate::storage::btree::{Node, LEAF_NODE_MAX_CELLS};
use crate::storage::row::{self, Row};
use crate::storage::table::Table;
use tracing::debug;

/// A position within the table.
///
/// The cursor borrows the table mutably for its entire lifetime, so it
/// cannot outlive the open table and no two cursors coexist.
pub struct Cursor<'a> {
    table: &'a mut Table,
    pub page_num: u32,
    pub cell_num: u32,
    /// Set when the cursor sits one past the last cell.
    pub end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Positions a cursor on the first cell of the table.
    pub fn start(table: &'a mut Table) -> Result<Self, Error> {
        let page_num = table.root_page_num;
        let num_cells = {
            let page = table.pager.get_page(page_num)?;
            Node::new(page).leaf_node_num_cells()?
        };

        Ok(Cursor {
            table,
            page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    /// Positions a cursor one past the last cell, where the next row
    /// is appended.
    pub fn end(table: &'a mut Table) -> Result<Self, Error> {
        let page_num = table.root_page_num;
        let num_cells = {
            let page = table.pager.get_page(page_num)?;
            Node::new(page).leaf_node_num_cells()?
        };

        Ok(Cursor {
            table,
            page_num,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    /// Moves to the next cell, flagging the end of the table once the
    /// current page runs out of cells.
    pub fn advance(&mut self) -> Result<(), Error> {
        let page = self.table.pager.get_page(self.page_num)?;
        let num_cells = Node::new(page).leaf_node_num_cells()?;

        self.cell_num += 1;
        if self.cell_num >= num_cells {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Decodes the row stored at the cursor position.
    pub fn read_row(&mut self) -> Result<Row, Error> {
        let page = self.table.pager.get_page(self.page_num)?;
        let node = Node::new(page);
        row::deserialize_row(node.leaf_node_value(self.cell_num)?)
    }

    /// Writes a (key, row) cell at the cursor position. Cells at and
    /// after the position shift right by one; a full leaf is fatal
    /// until node splitting is implemented.
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<(), Error> {
        let page = self.table.pager.get_page(self.page_num)?;
        let mut node = Node::new(page);

        let num_cells = node.leaf_node_num_cells()?;
        if num_cells >= LEAF_NODE_MAX_CELLS as u32 {
            return Err(err!(Storage, "Need to implement splitting a leaf node."));
        }

        if self.cell_num < num_cells {
            for i in (self.cell_num + 1..=num_cells).rev() {
                node.copy_leaf_node_cell(i - 1, i)?;
            }
        }

        node.set_leaf_node_num_cells(num_cells + 1);
        node.set_leaf_node_key(self.cell_num, key)?;
        row::serialize_row(row, node.leaf_node_value_mut(self.cell_num)?)?;

        debug!(key, cell_num = self.cell_num, "Inserted cell into leaf");
        Ok(())
    }
}
