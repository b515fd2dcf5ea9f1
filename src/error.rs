// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for apifetch
//!
//! Construction-time failures (`Config`) are returned directly to the caller.
//! Everything that goes wrong while a request is in flight is handed to the
//! client's [`ErrorSink`](crate::sink::ErrorSink) instead.

use thiserror::Error;

/// Result type alias for apifetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for apifetch
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL + path did not form a valid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request data could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The identity provider failed to produce a token
    #[error("Identity provider error: {reason}")]
    Identity { reason: String },

    /// Response body was neither JSON nor UTF-8 text
    #[error("Invalid body type (status {status}): {reason}")]
    InvalidBodyType { status: u16, reason: String },

    /// A custom transport reported a failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an identity provider error
    pub fn identity(reason: impl Into<String>) -> Self {
        Error::Identity {
            reason: reason.into(),
        }
    }

    /// Create an invalid body type error
    pub fn invalid_body_type(status: u16, reason: impl Into<String>) -> Self {
        Error::InvalidBodyType {
            status,
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a network-class failure
    ///
    /// Identity failures count: a token that cannot be refreshed is as fatal
    /// to the request as a refused connection.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Url(_) | Error::Transport(_) | Error::Identity { .. }
        )
    }

    /// Check if this is a construction-time failure
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if the response body could not be read
    pub fn is_body_format(&self) -> bool {
        matches!(self, Error::InvalidBodyType { .. })
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::InvalidBodyType { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
