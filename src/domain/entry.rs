use chrono::{DateTime, FixedOffset};

/// One post lifted from a station page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    published_at: DateTime<FixedOffset>,
    content: String,
}

impl Entry {
    pub fn new(published_at: DateTime<FixedOffset>, content: impl Into<String>) -> Self {
        Self {
            published_at,
            content: content.into().trim().to_string(),
        }
    }

    /// Absolute time resolved from the relative phrase at parse time.
    pub fn published_at(&self) -> DateTime<FixedOffset> {
        self.published_at
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
