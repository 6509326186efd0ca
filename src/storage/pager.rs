//! The pager owns the database file and a fixed array of in-memory
//! page slots. Pages are loaded lazily on first access and written back
//! only on close; there is no eviction. Every I/O failure here is
//! fatal, the caller is expected to give up and exit.

use crate::err;
use crate::errors::Error;
use crate::storage::{PAGE_SIZE, TABLE_MAX_PAGES};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info, trace};

pub type Page = [u8; PAGE_SIZE];

pub struct Pager {
    file: File,
    /// File length in bytes, observed at open.
    pub file_size: u64,
    /// Highest of pages-on-disk and pages ever materialized in cache.
    pub num_pages: u32,
    pages: [Option<Box<Page>>; TABLE_MAX_PAGES],
}

impl Pager {
    /// Opens the database file, creating it if absent, and discovers
    /// its size. A length that is not a whole number of pages means the
    /// file was not written by us.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        let file_size = file.seek(SeekFrom::End(0))?;
        if file_size % PAGE_SIZE as u64 != 0 {
            return Err(err!(
                Storage,
                "Db file is not a whole number of pages. Corrupt file."
            ));
        }

        let num_pages = (file_size / PAGE_SIZE as u64) as u32;
        info!(path = %path.display(), file_size, num_pages, "Opened database file");

        Ok(Pager {
            file,
            file_size,
            num_pages,
            pages: std::array::from_fn(|_| None),
        })
    }

    /// Returns the page buffer for `page_num`, reading it from disk on
    /// a cache miss. A miss past the end of the file yields a zeroed
    /// page and grows `num_pages`.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut Page, Error> {
        if page_num as usize >= TABLE_MAX_PAGES {
            return Err(err!(
                Storage,
                "Tried to fetch page number out of bounds. {} > {}",
                page_num,
                TABLE_MAX_PAGES
            ));
        }

        if self.pages[page_num as usize].is_none() {
            let mut page: Box<Page> = Box::new([0u8; PAGE_SIZE]);
            let pages_on_disk = (self.file_size / PAGE_SIZE as u64) as u32;

            if page_num <= pages_on_disk {
                self.file
                    .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
                // Reading the slot one past the last on-disk page hits
                // EOF immediately; the page stays zeroed.
                match self.file.read_exact(page.as_mut()) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::UnexpectedEof => {}
                    Err(e) => return Err(Error::Io(e)),
                }
            }

            debug!(page_num, "Page cache miss, materialized page");
            self.pages[page_num as usize] = Some(page);
            if page_num >= self.num_pages {
                self.num_pages = page_num + 1;
            }
        }

        match &mut self.pages[page_num as usize] {
            Some(page) => Ok(page.as_mut()),
            None => Err(err!(Storage, "Memory page {} not found.", page_num)),
        }
    }

    /// Writes one cached page back to its slot in the file.
    pub fn flush(&mut self, page_num: u32) -> Result<(), Error> {
        let page = self.pages[page_num as usize]
            .as_ref()
            .ok_or_else(|| err!(Storage, "Tried to flush unallocated page {}.", page_num))?;

        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(page.as_ref())?;
        trace!(page_num, "Flushed page");
        Ok(())
    }

    /// Flushes and frees every cached page, then closes the file.
    pub fn close(mut self) -> Result<(), Error> {
        let mut flushed = 0;
        for page_num in 0..self.num_pages {
            if self.pages[page_num as usize].is_some() {
                self.flush(page_num)?;
                self.pages[page_num as usize] = None;
                flushed += 1;
            }
        }
        self.file.sync_all()?;
        info!(pages = flushed, "Flushed page cache and closed database file");
        Ok(())
    }
}
