pub mod btree;
pub mod cursor;
pub mod pager;
pub mod row;
pub mod table;

/// Page size of 4 kilobytes, the same size as a page in the virtual
/// memory systems of most architectures. One page is the unit of disk
/// I/O and of cache residency.
pub const PAGE_SIZE: usize = 4096;

/// Fixed number of page slots a pager manages.
pub const TABLE_MAX_PAGES: usize = 100;
