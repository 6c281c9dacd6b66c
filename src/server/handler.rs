//! Per-connection request handling.

use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::parser::{Error as ParserError, Method, RequestLine, parse_request_line};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::resolver::PathResolver;
use crate::server::response::{HttpResponse, build_error, build_success};
use crate::server::stats::Outcome;

/// Serves exactly one request per connection.
///
/// Holds only read-only state, so one instance is shared by every
/// connection task.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    resolver: PathResolver,
    server_name: String,
    read_timeout: Duration,
    max_request_line: usize,
}

impl RequestHandler {
    /// Create a handler from the server configuration.
    pub fn new(config: &ServerConfig) -> Result<Self, Error> {
        Ok(Self {
            resolver: PathResolver::new(&config.document_root)?,
            server_name: config.server_name.clone(),
            read_timeout: config.read_timeout(),
            max_request_line: config.max_request_line,
        })
    }

    /// The resolver used to map targets to files.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Handle a single connection: read one line, answer it, shut down.
    ///
    /// Nothing is written if the client closes the connection or the read
    /// deadline passes before a request line arrives. An `Err` means the
    /// connection failed mid-way and must be dropped.
    pub async fn handle_connection<S>(&self, stream: &mut S) -> Result<Outcome, Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let raw_line = match tokio::time::timeout(self.read_timeout, self.read_request_line(stream)).await {
            Ok(Ok(Some(raw_line))) => raw_line,
            Ok(Ok(None)) => return Ok(Outcome::ClientClosed),
            Ok(Err(e)) => return Err(Error::IoError(e)),
            Err(_) => {
                warn!("No request line within {:?}, closing", self.read_timeout);
                return Ok(Outcome::TimedOut);
            }
        };

        let response = self.process(&raw_line).await;
        let status = response.status;
        response.write_to(stream).await?;

        if let Err(e) = stream.shutdown().await {
            debug!("Error shutting down connection: {e}");
        }

        Ok(Outcome::Responded(status))
    }

    /// Read the request line, terminator included.
    ///
    /// Returns `None` on EOF before any byte. Reads at most the length limit
    /// plus room for a `\r\n` terminator.
    async fn read_request_line<R>(&self, stream: &mut R) -> std::io::Result<Option<Vec<u8>>>
    where
        R: AsyncRead + Unpin,
    {
        let limit = self.max_request_line as u64 + 2;
        let mut reader = BufReader::new(stream).take(limit);
        let mut buf = Vec::new();

        let n = reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(buf))
    }

    /// Turn a raw request line into a response. Every error becomes an error
    /// response here.
    pub async fn process(&self, raw_line: &[u8]) -> HttpResponse {
        match self.respond(raw_line).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Request failed: {e}");
                build_error(e.status_code().as_u16())
            }
        }
    }

    async fn respond(&self, raw_line: &[u8]) -> Result<HttpResponse, Error> {
        if line_length(raw_line) > self.max_request_line {
            return Err(ParserError::RequestLineTooLong(self.max_request_line).into());
        }

        let line = parse_request_line(raw_line)?;
        debug!("Request: {line}");
        self.dispatch(&line).await
    }

    /// Answer a parsed request line according to its method.
    pub async fn dispatch(&self, line: &RequestLine) -> Result<HttpResponse, Error> {
        let method = line
            .recognized_method()
            .map_err(|_| Error::UnknownMethod(line.method.clone()))?;

        if !method.is_supported() {
            return Err(Error::UnsupportedMethod(method));
        }

        let resource = self.resolver.resolve(&line.target).await?;
        debug!("Serving {} ({} bytes)", resource.path.display(), resource.size);

        Ok(build_success(resource, method == Method::GET, &self.server_name))
    }
}

/// Length of a raw request line without its `\n` or `\r\n` terminator.
fn line_length(raw_line: &[u8]) -> usize {
    let line = raw_line.strip_suffix(b"\n").map_or(raw_line, |l| l.strip_suffix(b"\r").unwrap_or(l));
    line.len()
}
