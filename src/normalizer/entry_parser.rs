use chrono::{DateTime, FixedOffset};

use crate::domain::Entry;
use crate::normalizer::relative_time;

/// Turns one raw block into an entry, or `None` if the block is too short.
///
/// Block layout is heading line, content line, then the footer carrying the
/// relative time. Anything after the footer is ignored.
pub fn parse_entry(block: &str, now: DateTime<FixedOffset>) -> Option<Entry> {
    let mut lines = block.trim().split('\n');
    let (Some(_heading), Some(content), Some(footer)) = (lines.next(), lines.next(), lines.next())
    else {
        tracing::debug!(block = block.trim(), "Dropping malformed entry block");
        return None;
    };

    Some(Entry::new(relative_time::resolve(footer, now), content))
}
