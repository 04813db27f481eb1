use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::app::{Result, StationlogError};

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\A[[:word:]]+\z").expect("identifier pattern is valid"))
}

/// A station user name, checked before anything goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(raw: &str) -> Result<Self> {
        if identifier_pattern().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(StationlogError::InvalidIdentifier(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address of this user's station page under `base_url`.
    pub fn station_link(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
