use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// `fields` is keyed by wire field name (`customerEmail`, ...).
    #[error("validation error: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Maps a non-success status onto the matching variant.
    pub(crate) fn for_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound(message),
            409 => ClientError::Conflict(message),
            422 => ClientError::Validation {
                message,
                fields: BTreeMap::new(),
            },
            _ => ClientError::Server(message),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ClientError::Decode(err.to_string());
        }
        ClientError::Transport(err.to_string())
    }
}
