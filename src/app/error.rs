use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum TwetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Fetching {url} timed out after {}s", after.as_secs_f64())]
    Timeout { url: String, after: Duration },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed line: {0}")]
    MalformedLine(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Tweet not found: #{0}")]
    NotFound(String),

    #[error("Already following a feed named {0}")]
    DuplicateNickname(String),

    #[error("Not following a feed named {0}")]
    UnknownNickname(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TwetError>;
