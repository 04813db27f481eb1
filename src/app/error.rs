use thiserror::Error;

#[derive(Error, Debug)]
pub enum StationlogError {
    #[error("Wrong user name {0}")]
    InvalidIdentifier(String),

    #[error("Error retrieving content from {address}: {reason}")]
    Fetch { address: String, reason: String },

    #[error("Timed out retrieving content from {0}")]
    Timeout(String),

    #[error("Invalid certificate for capsule: {0}")]
    ExpiredCertificate(String),

    #[error("Capsule {address} answered {status} {meta}")]
    GeminiStatus {
        address: String,
        status: u8,
        meta: String,
    },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StationlogError {
    pub fn fetch(address: &str, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for every failure raised while talking to the capsule.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. }
                | Self::Timeout(_)
                | Self::ExpiredCertificate(_)
                | Self::GeminiStatus { .. }
                | Self::InvalidAddress(_)
                | Self::Tls(_)
                | Self::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StationlogError>;
