//! Error types for fetching and configuring events.

use thiserror::Error;

/// Message shown when a transport failure carries no text of its own.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch events";

/// Errors that can occur while loading events.
#[derive(Error, Debug)]
pub enum NycEventsError {
    #[error("API error: {status}")]
    Api { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl NycEventsError {
    /// Build a transport error, falling back to a generic message when empty.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            NycEventsError::Transport(FETCH_FALLBACK_MESSAGE.to_string())
        } else {
            NycEventsError::Transport(message)
        }
    }

    /// Upstream HTTP status, if the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            NycEventsError::Api { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NycEventsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            let message = match std::error::Error::source(&err) {
                Some(source) => format!("{err}: {source}"),
                None => err.to_string(),
            };
            return NycEventsError::Decode(message);
        }
        match err.status() {
            Some(status) => NycEventsError::Api {
                status: status.as_u16(),
            },
            None => NycEventsError::transport(err.to_string()),
        }
    }
}

/// Result type alias for event operations.
pub type NycEventsResult<T> = Result<T, NycEventsError>;
