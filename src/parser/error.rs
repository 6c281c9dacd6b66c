//! Error types for the request line parser.

use thiserror::Error;

/// Errors that can occur while parsing a request line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The request line does not consist of exactly three space-separated tokens.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The request line exceeds the configured length limit.
    #[error("Request line longer than {0} bytes")]
    RequestLineTooLong(usize),

    /// The request line is not valid UTF-8.
    #[error("Request line is not valid UTF-8")]
    InvalidEncoding,

    /// The request line is empty.
    #[error("Empty request")]
    EmptyRequest,
}
