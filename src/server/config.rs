//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::server::error::Error;

/// Identification string sent in the `Server` header unless overridden.
pub const DEFAULT_SERVER_NAME: &str = concat!("tinyhttpd/", env!("CARGO_PKG_VERSION"));

/// HTTP server configuration.
///
/// Built once at startup and shared read-only by every connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// The address to bind to. Port 0 lets the OS pick one.
    pub addr: SocketAddr,
    /// Directory files are served from.
    pub document_root: PathBuf,
    /// Value of the `Server` header.
    pub server_name: String,
    /// The maximum number of concurrent connections.
    pub max_connections: usize,
    /// How long a client may take to send its request line, in milliseconds.
    pub read_timeout_ms: u64,
    /// Longest request line accepted, in bytes.
    pub max_request_line: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            document_root: PathBuf::from("."),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            max_connections: 1024,
            read_timeout_ms: 10_000,
            max_request_line: 8192,
        }
    }
}

impl ServerConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Parse a configuration from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// The request line read deadline.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Check the values that cannot be fixed up later.
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_connections == 0 {
            return Err(Error::Config("max_connections must be at least 1".to_string()));
        }
        if self.read_timeout_ms == 0 {
            return Err(Error::Config("read_timeout_ms must be at least 1".to_string()));
        }
        if self.max_request_line == 0 {
            return Err(Error::Config("max_request_line must be at least 1".to_string()));
        }
        Ok(())
    }
}
