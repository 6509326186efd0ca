//! Node layout for the B-tree that backs the table.
//!
//! Every node occupies one page. A common header tags the node kind so
//! internal nodes can be added later without disturbing the leaf
//! format; only leaves are implemented, and a leaf stores an array of
//! (key, row) cells after a small header:
//!
//! | offset       | size | field       |
//! |--------------|------|-------------|
//! | 0            | 1    | node type   |
//! | 1            | 1    | is_root     |
//! | 2            | 4    | parent page |
//! | 6            | 4    | num_cells   |
//! | 10 + i * 297 | 297  | cell i      |

use crate::err;
use crate::errors::Error;
use crate::storage::row::ROW_SIZE;
use crate::storage::PAGE_SIZE;
use std::mem;

// Common Node Header Layout

pub const NODE_TYPE_SIZE: usize = mem::size_of::<u8>();
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = mem::size_of::<u8>();
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = mem::size_of::<u32>();
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize =
    NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

// Leaf Node Header Layout

pub const LEAF_NODE_NUM_CELLS_SIZE: usize = mem::size_of::<u32>();
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize =
    COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// Leaf Node Body Layout

pub const LEAF_NODE_KEY_SIZE: usize = mem::size_of::<u32>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;

/// How many cells fit in one leaf. Inserting into a leaf already at
/// this count is a fatal error until node splitting exists.
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

/// Kind tag stored in the first header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Internal,
    Leaf,
}

impl NodeType {
    fn from_byte(byte: u8) -> Result<Self, Error> {
        match byte {
            0 => Ok(NodeType::Internal),
            1 => Ok(NodeType::Leaf),
            invalid => Err(err!(Storage, "Invalid node type value: {}", invalid)),
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            NodeType::Internal => 0,
            NodeType::Leaf => 1,
        }
    }
}

/// A node view over one page buffer. The view borrows the page from the
/// pager and must not be held across other pager calls; a future split
/// implementation may relocate pages.
pub struct Node<'a> {
    page: &'a mut [u8; PAGE_SIZE],
}

impl<'a> Node<'a> {
    pub fn new(page: &'a mut [u8; PAGE_SIZE]) -> Self {
        Node { page }
    }

    pub fn node_type(&self) -> Result<NodeType, Error> {
        NodeType::from_byte(self.page[NODE_TYPE_OFFSET])
    }

    pub fn set_node_type(&mut self, node_type: NodeType) {
        self.page[NODE_TYPE_OFFSET] = node_type.to_byte();
    }

    /// Turns the page into an empty leaf. The root flag and parent
    /// pointer stay zero.
    pub fn init_leaf(&mut self) {
        self.set_node_type(NodeType::Leaf);
        self.set_leaf_node_num_cells(0);
    }

    /// Reads the cell count from the leaf header.
    pub fn leaf_node_num_cells(&self) -> Result<u32, Error> {
        let bytes = &self.page
            [LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE];
        let bytes = bytes
            .try_into()
            .map_err(|e| err!(Storage, "Failed to decode num_cells: {:?}", e))?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn set_leaf_node_num_cells(&mut self, num: u32) {
        self.page
            [LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
            .copy_from_slice(&num.to_le_bytes());
    }

    /// Byte offset of cell `cell_num` within the page.
    fn leaf_node_cell_offset(&self, cell_num: u32) -> Result<usize, Error> {
        if cell_num as usize >= LEAF_NODE_MAX_CELLS {
            return Err(err!(
                Storage,
                "Cell number out of bounds (cell_num={}, max_cells={})",
                cell_num,
                LEAF_NODE_MAX_CELLS
            ));
        }
        Ok(LEAF_NODE_HEADER_SIZE + cell_num as usize * LEAF_NODE_CELL_SIZE)
    }

    pub fn leaf_node_cell(&self, cell_num: u32) -> Result<&[u8], Error> {
        let offset = self.leaf_node_cell_offset(cell_num)?;
        Ok(&self.page[offset..offset + LEAF_NODE_CELL_SIZE])
    }

    /// Reads the key of cell `cell_num`, stored little-endian at the
    /// start of the cell.
    pub fn leaf_node_key(&self, cell_num: u32) -> Result<u32, Error> {
        let cell = self.leaf_node_cell(cell_num)?;
        let bytes: [u8; LEAF_NODE_KEY_SIZE] = cell[..LEAF_NODE_KEY_SIZE]
            .try_into()
            .map_err(|e| err!(Storage, "Failed to decode key: {:?}", e))?;
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn set_leaf_node_key(&mut self, cell_num: u32, key: u32) -> Result<(), Error> {
        let offset = self.leaf_node_cell_offset(cell_num)?;
        self.page[offset..offset + LEAF_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
        Ok(())
    }

    /// Value slot of cell `cell_num`, following the key in the cell.
    pub fn leaf_node_value(&self, cell_num: u32) -> Result<&[u8], Error> {
        let offset = self.leaf_node_cell_offset(cell_num)? + LEAF_NODE_VALUE_OFFSET;
        Ok(&self.page[offset..offset + LEAF_NODE_VALUE_SIZE])
    }

    pub fn leaf_node_value_mut(&mut self, cell_num: u32) -> Result<&mut [u8], Error> {
        let offset = self.leaf_node_cell_offset(cell_num)? + LEAF_NODE_VALUE_OFFSET;
        Ok(&mut self.page[offset..offset + LEAF_NODE_VALUE_SIZE])
    }

    /// Copies cell `src` over cell `dst`, key and value both. Used to
    /// shift cells when inserting into the middle of a leaf.
    pub fn copy_leaf_node_cell(&mut self, src: u32, dst: u32) -> Result<(), Error> {
        let src_offset = self.leaf_node_cell_offset(src)?;
        let dst_offset = self.leaf_node_cell_offset(dst)?;
        self.page
            .copy_within(src_offset..src_offset + LEAF_NODE_CELL_SIZE, dst_offset);
        Ok(())
    }
}
