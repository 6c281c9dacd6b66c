//! Request line parsing and representation.

use std::fmt;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;

/// The first line of an HTTP request.
///
/// Nothing after the request line is read, so this is the whole request as
/// far as the server is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// The method token exactly as sent (GET, HEAD, ...)
    pub method: String,
    /// The request target, e.g. `/index.html`
    pub target: String,
    /// The protocol version token. Not interpreted.
    pub version: String,
}

impl RequestLine {
    /// Create a new request line from its three tokens.
    pub fn new(method: impl Into<String>, target: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            version: version.into(),
        }
    }

    /// Look up the method token among the methods the server recognises.
    ///
    /// # Returns
    ///
    /// The recognised method, or an error for any other token
    pub fn recognized_method(&self) -> Result<Method, Error> {
        Method::from_str(&self.method)
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.target, self.version)
    }
}

/// Parse a request line from a byte slice.
///
/// The input may still carry its `\r\n` or `\n` terminator. Tokens are
/// separated by single spaces, so repeated or leading spaces produce empty
/// tokens and make the line malformed.
///
/// # Arguments
///
/// * `input` - The bytes of the first line read from the connection
///
/// # Returns
///
/// The parsed request line, or an error if it is not exactly three tokens
pub fn parse_request_line(input: &[u8]) -> Result<RequestLine, Error> {
    let line = std::str::from_utf8(input).map_err(|_| Error::InvalidEncoding)?;

    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);

    if line.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let parts: Vec<&str> = line.split(' ').collect();
    match parts.as_slice() {
        [method, target, version] if !method.is_empty() && !target.is_empty() && !version.is_empty() => {
            Ok(RequestLine::new(*method, *target, *version))
        }
        _ => Err(Error::MalformedRequestLine(line.to_string())),
    }
}
