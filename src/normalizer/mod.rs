//! Station page normalization.
//!
//! ```text
//! page -> segmenter -> raw blocks -> entry_parser -> entries
//!                                        |
//!                                   relative_time
//! ```

pub mod entry_parser;
pub mod relative_time;
pub mod segmenter;

use chrono::{DateTime, FixedOffset};

use crate::domain::{Entry, TinyLog};

pub use segmenter::PageHeader;

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the author header and every well-formed entry, in page order.
    pub fn normalize(
        &self,
        page: &str,
        now: DateTime<FixedOffset>,
    ) -> (Option<PageHeader>, Vec<Entry>) {
        let page = page.replace("\r\n", "\n");
        let (header, blocks) = segmenter::segment(&page);

        let entries: Vec<Entry> = blocks
            .filter_map(|block| entry_parser::parse_entry(block, now))
            .collect();

        (header, entries)
    }

    /// Fills `log` from `page`. Malformed pieces are dropped, never reported.
    pub fn apply(&self, log: &mut TinyLog, page: &str, now: DateTime<FixedOffset>) {
        let (header, entries) = self.normalize(page, now);

        if let Some(header) = header {
            log.set_header(&header.avatar, &header.author);
        }
        log.entries = entries;
    }
}
