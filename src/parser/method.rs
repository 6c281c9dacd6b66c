//! HTTP request methods recognised by the server.

use std::fmt;
use std::str::FromStr;

use crate::parser::error::Error;

/// Methods the server knows about.
///
/// Only `GET` and `HEAD` are served. `POST` is recognised so it can be
/// answered with `501 Not Implemented`; any other token is a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// HEAD method: Same as GET but only transfers the status line and header section.
    HEAD,
    /// POST method: Recognised, never implemented.
    POST,
}

impl Method {
    /// Whether the server can answer this method with a file.
    pub fn is_supported(&self) -> bool {
        matches!(self, Method::GET | Method::HEAD)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Method tokens are case-sensitive.
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            _ => Err(Error::MalformedRequestLine(format!("unknown method {s}"))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
