//! Splits a station page into its author header and raw entry blocks.

/// Prefix shared by every section heading on the page.
pub const SECTION_MARKER: &str = "###";

/// Heading that opens the list of posts.
pub const LOGS_MARKER: &str = "### Logs";

/// Entries are separated by an empty line.
const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHeader {
    pub avatar: String,
    pub author: String,
}

impl PageHeader {
    /// Reads `### <avatar> <author>`. Missing tokens come back empty.
    fn from_line(line: &str) -> Self {
        let mut tokens = line.split_whitespace().skip(1);
        let avatar = tokens.next().unwrap_or_default().to_string();
        let author = tokens.next().unwrap_or_default().to_string();
        Self { avatar, author }
    }
}

/// Finds the header of `page` and lazily splits its entry region into blocks.
///
/// The entry region starts on the line after the first `### Logs` heading.
/// A page without that heading is treated as all entries; nothing guards
/// against the junk blocks this produces, they are dropped later for being
/// too short.
pub fn segment(page: &str) -> (Option<PageHeader>, impl Iterator<Item = &str>) {
    let mut header = None;
    let mut logs_start = None;
    let mut offset = 0;

    for line in page.split('\n') {
        let next_offset = offset + line.len() + 1;

        if line.starts_with(LOGS_MARKER) {
            if logs_start.is_none() {
                logs_start = Some(next_offset.min(page.len()));
            }
        } else if header.is_none() && line.starts_with(SECTION_MARKER) {
            header = Some(PageHeader::from_line(line));
        }

        if header.is_some() && logs_start.is_some() {
            break;
        }
        offset = next_offset;
    }

    if logs_start.is_none() {
        tracing::debug!("No logs heading found, treating whole page as entries");
    }

    let region = &page[logs_start.unwrap_or(0)..];
    (header, region.split(BLOCK_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "### avatar_url author_name\n\
                        Some profile text\n\
                        \n\
                        ### Logs\n\
                        ### first\n\
                        Hello\n\
                        · 1 hour ago\n\
                        \n\
                        ### second\n\
                        World\n\
                        · 2 days ago";

    #[test]
    fn test_header_and_two_blocks() {
        let (header, blocks) = segment(PAGE);
        let header = header.unwrap();
        assert_eq!(header.author, "author_name");
        assert_eq!(header.avatar, "avatar_url");

        let blocks: Vec<&str> = blocks.collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("### first"));
        assert!(blocks[1].starts_with("### second"));
    }

    #[test]
    fn test_first_header_wins() {
        let page = "### 🚀 alice\n### 🐢 bob\n### Logs\n";
        let (header, _) = segment(page);
        assert_eq!(
            header,
            Some(PageHeader {
                avatar: "🚀".into(),
                author: "alice".into()
            })
        );
    }

    #[test]
    fn test_logs_marker_is_never_a_header() {
        let page = "### Logs\n### 🚀 alice\nhi\n· 1 hour ago";
        let (header, blocks) = segment(page);
        assert_eq!(header.unwrap().author, "alice");
        assert_eq!(blocks.count(), 1);
    }

    #[test]
    fn test_first_logs_marker_wins() {
        let page = "### Logs\na\n\n### Logs\nb";
        let (_, blocks) = segment(page);
        let blocks: Vec<&str> = blocks.collect();
        assert_eq!(blocks, vec!["a", "### Logs\nb"]);
    }

    #[test]
    fn test_missing_logs_marker_uses_whole_page() {
        let page = "### 🚀 alice\nintro\n\nsecond";
        let (_, blocks) = segment(page);
        let blocks: Vec<&str> = blocks.collect();
        assert_eq!(blocks, vec!["### 🚀 alice\nintro", "second"]);
    }

    #[test]
    fn test_logs_marker_on_last_line() {
        let (_, blocks) = segment("### 🚀 alice\n### Logs");
        let blocks: Vec<&str> = blocks.collect();
        assert_eq!(blocks, vec![""]);
    }

    #[test]
    fn test_short_header_line() {
        let (header, _) = segment("###\n### Logs\n");
        assert_eq!(header, Some(PageHeader::default()));
    }

    #[test]
    fn test_no_header() {
        let (header, _) = segment("just text\n### Logs\n");
        assert!(header.is_none());
    }
}
