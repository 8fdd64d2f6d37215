//! Error types for the snapshot pipeline

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the snapshot pipeline
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Input errors (no run is performed)
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Conflicting input: {0}")]
    ConflictingInput(String),

    #[error("Missing {key} API key for source chain {chain}")]
    MissingCredential { chain: String, key: String },

    #[error("Unknown source chain: {0}")]
    UnknownChain(String),

    #[error("Unknown target type: {0}")]
    UnknownTargetType(String),

    #[error("Invalid address sub-type {subtype} for target {target}")]
    InvalidSubtype { target: String, subtype: String },

    // Provider errors
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("{provider} API error {status}: {body}")]
    HttpStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} RPC error: {message}")]
    ProviderRpc {
        provider: &'static str,
        message: String,
    },

    // Serialization errors
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Check if this error means the run could not start at all
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MissingInput(_)
                | Error::ConflictingInput(_)
                | Error::MissingCredential { .. }
                | Error::UnknownChain(_)
                | Error::UnknownTargetType(_)
                | Error::InvalidSubtype { .. }
        )
    }

    /// Check if this error is a provider failure a stage recovers from
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::ProviderRpc { .. }
                | Error::Deserialization(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // reqwest embeds the request URL, which carries API keys for some providers
        Error::Http(e.without_url().to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Deserialization(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
