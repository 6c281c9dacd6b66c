//! HTTP/1.0 file server.
//!
//! Each accepted connection gets its own task, which reads a single request
//! line, answers it from the document root and closes the connection.

mod config;
mod content_type;
mod error;
mod handler;
mod http_server;
mod resolver;
mod response;
mod stats;

// Re-export public items
pub use config::{DEFAULT_SERVER_NAME, ServerConfig};
pub use content_type::{DEFAULT_CONTENT_TYPE, content_type_for};
pub use error::Error;
pub use handler::RequestHandler;
pub use http_server::HttpServer;
pub use resolver::{INDEX_TARGET, PathResolver, ResolvedResource};
pub use response::{
    Body, DATE_FORMAT, HTTP_VERSION, HttpResponse, StatusCode, build_error, build_success, format_date,
    format_system_time,
};
pub use stats::{Outcome, ServerStats, StatsSnapshot};
