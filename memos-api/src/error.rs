// SPDX-License-Identifier: MIT
//! Error type for the Memos client.
//!
//! Kept deliberately small: the caller's job is to show a message, so every
//! variant renders to one human-readable line, and HTTP failures carry the
//! status code of the call that failed.

use std::fmt;

/// Result alias used throughout the crate.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a non-success status.
    Status { call: &'static str, status: u16 },
    /// The server answered 2xx but the body was missing a required field.
    MissingField { call: &'static str, field: &'static str },
    /// Connection, TLS, or body decoding failure from reqwest.
    Transport(reqwest::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status { call, status } => {
                write!(f, "{} failed: HTTP {}", call, status)
            }
            ApiError::MissingField { call, field } => {
                write!(f, "{} returned no `{}` field", call, field)
            }
            ApiError::Transport(e) => write!(f, "request failed: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}
