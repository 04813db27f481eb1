use crate::domain::Entry;

/// The feed model for one invocation: built empty, filled once, rendered once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TinyLog {
    pub author: String,
    pub avatar: String,
    pub link: String,
    pub entries: Vec<Entry>,
    header_set: bool,
}

impl TinyLog {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }

    /// Applies author and avatar. Only the first call has any effect.
    pub fn set_header(&mut self, avatar: &str, author: &str) -> bool {
        if self.header_set {
            return false;
        }
        self.avatar = avatar.to_string();
        self.author = author.to_string();
        self.header_set = true;
        true
    }

    pub fn has_avatar(&self) -> bool {
        !self.avatar.is_empty()
    }
}
