//! Renders a [`TinyLog`] as gemtext.

use crate::domain::TinyLog;

/// `Mon 02 Jan 2006 15:04 -0700`
pub const DATE_FORMAT: &str = "%a %d %b %Y %H:%M %z";

#[derive(Clone)]
pub struct Renderer;

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, log: &TinyLog) -> String {
        let mut out = format!(
            "# {author}'s TinyLog - Generated from station\n\nAuthor: @{author}\n",
            author = log.author
        );
        if log.has_avatar() {
            out.push_str(&format!("Avatar: {}\n", log.avatar));
        }
        out.push('\n');

        for entry in &log.entries {
            out.push_str(&format!(
                "## {}\n{}\n\n",
                entry.published_at().format(DATE_FORMAT),
                entry.content()
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::Entry;

    fn fixed_entry(content: &str) -> Entry {
        let at = DateTime::parse_from_rfc3339("2006-01-02T15:04:05-07:00").unwrap();
        Entry::new(at, content)
    }

    #[test]
    fn test_render_without_avatar() {
        let mut log = TinyLog::new("gemini://station.martinrue.com/alice");
        log.set_header("", "alice");
        log.entries.push(fixed_entry("hello"));

        assert_eq!(
            Renderer::new().render(&log),
            "# alice's TinyLog - Generated from station\n\n\
             Author: @alice\n\n\
             ## Mon 02 Jan 2006 15:04 -0700\nhello\n\n"
        );
    }

    #[test]
    fn test_render_with_avatar() {
        let mut log = TinyLog::new("gemini://station.martinrue.com/alice");
        log.set_header("🚀", "alice");
        log.entries.push(fixed_entry("first"));
        log.entries.push(fixed_entry("second"));

        assert_eq!(
            Renderer::new().render(&log),
            "# alice's TinyLog - Generated from station\n\n\
             Author: @alice\n\
             Avatar: 🚀\n\n\
             ## Mon 02 Jan 2006 15:04 -0700\nfirst\n\n\
             ## Mon 02 Jan 2006 15:04 -0700\nsecond\n\n"
        );
    }

    #[test]
    fn test_render_without_entries_is_header_only() {
        let mut log = TinyLog::new("gemini://station.martinrue.com/bob");
        log.set_header("", "bob");

        assert_eq!(
            Renderer::new().render(&log),
            "# bob's TinyLog - Generated from station\n\nAuthor: @bob\n\n"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut log = TinyLog::new("gemini://station.martinrue.com/alice");
        log.set_header("🚀", "alice");
        log.entries.push(fixed_entry("hello"));

        let renderer = Renderer::new();
        assert_eq!(renderer.render(&log), renderer.render(&log));
    }

    #[test]
    fn test_positive_offset_keeps_sign() {
        let at = DateTime::parse_from_rfc3339("2024-12-31T23:59:00+05:30").unwrap();
        assert_eq!(at.format(DATE_FORMAT).to_string(), "Tue 31 Dec 2024 23:59 +0530");
    }
}
