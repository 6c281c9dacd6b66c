//! A minimal HTTP/1.0 static file server.
//!
//! Every connection carries exactly one request. The server reads the request
//! line, maps the target to a file under the document root and answers with a
//! status line, a fixed set of headers and, for `GET`, the file contents.
//! The connection is closed afterwards.
//!
//! # Features
//!
//! - `GET` and `HEAD` for regular files below the document root
//! - `POST` answered with `501 Not Implemented`, anything else with `400 Bad Request`
//! - Content type by file extension
//! - Path traversal out of the document root is rejected
//! - A bounded number of concurrent connections and a read deadline on the request line
//!
//! # Examples
//!
//! ## Parsing a request line
//!
//! ```
//! use tinyhttpd::{Method, parse_request_line};
//!
//! let line = parse_request_line(b"GET /index.html HTTP/1.0\r\n").unwrap();
//! assert_eq!(line.target, "/index.html");
//! assert_eq!(line.recognized_method().unwrap(), Method::GET);
//! ```
//!
//! ## Error responses
//!
//! ```
//! use tinyhttpd::build_error;
//!
//! let response = build_error(404);
//! let head = String::from_utf8(response.head_bytes()).unwrap();
//! assert!(head.starts_with("HTTP/1.0 404 Not Found\r\nDate: "));
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use tinyhttpd::{HttpServer, ServerConfig};
//!
//! # async fn run() -> Result<(), tinyhttpd::ServerError> {
//! let config = ServerConfig {
//!     document_root: "./www".into(),
//!     ..ServerConfig::default()
//! };
//! HttpServer::new(config)?.start().await
//! # }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, Method, RequestLine, parse_request_line};
pub use server::{
    Error as ServerError, HttpResponse, HttpServer, PathResolver, RequestHandler, ServerConfig, StatusCode,
    build_error, build_success,
};
