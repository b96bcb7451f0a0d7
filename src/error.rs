use std::path::PathBuf;
use thiserror::Error;

pub const INVALID_KEY_MESSAGE: &str = "Invalid API key. Please check and try again.";

/// Errors raised while talking to the TMDB API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API key is not set")]
    MissingKey,

    #[error("Invalid API key")]
    InvalidKey,

    #[error("Request error: {status} - {status_text}")]
    Request { status: u16, status_text: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Data format error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure means the credential itself was refused.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::InvalidKey | ApiError::MissingKey)
            || matches!(self.status(), Some(401))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingKey => "No API key configured. Press K to enter one.".to_string(),
            ApiError::InvalidKey | ApiError::Request { status: 401, .. } => {
                INVALID_KEY_MESSAGE.to_string()
            }
            ApiError::Request { status, status_text } => {
                format!("TMDB rejected the request ({}): {}", status, status_text)
            }
            ApiError::Transport(e) => format!("Network error: {}", e),
            ApiError::Parse(e) => format!("Unexpected response from TMDB: {}", e),
        }
    }
}

/// Errors from the persistent API key slot.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Could not access key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while loading `config.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Format(#[from] serde_json::Error),
}
