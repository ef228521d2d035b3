//! Error types for the articulos API client.
//!
//! # Design
//! `NotFound` keeps its own variant so callers can tell a missing record from
//! an unexpected status. Every other non-2xx lands in `HttpError` with the raw
//! status and body. `Transport` covers requests that never produced a
//! response; the host reports those through the same channel.

use thiserror::Error;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never reached the server (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Status code carried by the error, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
