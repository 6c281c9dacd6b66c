//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::{Error as ParserError, Method};
use crate::server::response::StatusCode;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing the request line.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// The method token is not one the server recognises.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// The method is recognised but not implemented.
    #[error("Method {0} not implemented")]
    UnsupportedMethod(Method),

    /// The request target does not start with `/`.
    #[error("Invalid request target: {0}")]
    InvalidTarget(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// Invalid server configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON configuration could not be parsed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// The status code a client receives for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ParseError(_) | Error::UnknownMethod(_) | Error::InvalidTarget(_) => {
                StatusCode::BadRequest
            }
            Error::UnsupportedMethod(_) => StatusCode::NotImplemented,
            Error::NotFound(_) => StatusCode::NotFound,
            Error::IoError(_) | Error::InternalError(_) | Error::Config(_) | Error::JsonError(_) => {
                StatusCode::InternalServerError
            }
        }
    }
}
