//! Request line parser.
//!
//! An HTTP/1.0 client sends `<METHOD> <TARGET> <VERSION>` as its first line.
//! This server reads nothing else, so the parser only deals with that line.

mod request;
mod method;
mod error;

// Re-export public items
pub use request::RequestLine;
pub use method::Method;
pub use error::Error;

// Re-export the parse_request_line function
pub use request::parse_request_line;
