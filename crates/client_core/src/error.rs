use std::path::PathBuf;

use thiserror::Error;

/// Shown whenever the service did not hand back a usable message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to shorten URL";

#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("failed to reach shortening service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("shortening service returned HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Service {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed response from shortening service: {0}")]
    MalformedResponse(String),
    #[error("invalid service endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("request was not delivered: {0}")]
    Interrupted(String),
}

impl ShortenError {
    /// The text rendered in the error banner. Service messages are surfaced
    /// verbatim; everything else collapses to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid api_base_url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("invalid request timeout '{0}': expected a whole number of seconds")]
    InvalidTimeout(String),
}
