use crate::errors::Error;
use crate::storage::btree::Node;
use crate::storage::pager::Pager;
use std::path::Path;
use tracing::info;

/// A table is a pager plus the page number of its root node. The root
/// lives in page 0 and stays there; nothing rewires it until internal
/// nodes exist.
pub struct Table {
    pub pager: Pager,
    pub root_page_num: u32,
}

impl Table {
    /// Opens the database file behind a pager. A brand new (empty) file
    /// gets page 0 materialized and initialized as an empty leaf.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let mut pager = Pager::open(path)?;

        if pager.num_pages == 0 {
            let root = pager.get_page(0)?;
            Node::new(root).init_leaf();
            info!("New database file, initialized page 0 as an empty leaf");
        }

        Ok(Table {
            pager,
            root_page_num: 0,
        })
    }

    /// Flushes all cached pages and releases the file.
    pub fn close(self) -> Result<(), Error> {
        self.pager.close()
    }

    /// Keys of the root leaf in cell order, for tree visualization.
    pub fn root_keys(&mut self) -> Result<Vec<u32>, Error> {
        let page = self.pager.get_page(self.root_page_num)?;
        let node = Node::new(page);
        let num_cells = node.leaf_node_num_cells()?;
        (0..num_cells).map(|i| node.leaf_node_key(i)).collect()
    }
}
