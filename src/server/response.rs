//! HTTP response types and the builders for success and error responses.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::server::error::Error;
use crate::server::resolver::ResolvedResource;

/// Protocol version on every status line, whatever the client sent.
pub const HTTP_VERSION: &str = "HTTP/1.0";

/// Format used for the `Date` and `Last-Modified` headers.
pub const DATE_FORMAT: &str = "%b %d,%Y %H:%M";

/// HTTP status codes the server answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
    NotImplemented,
    /// Any other code. Sent with a generic reason phrase.
    Other(u16),
}

impl StatusCode {
    /// Map a numeric code to a status.
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            400 => StatusCode::BadRequest,
            404 => StatusCode::NotFound,
            500 => StatusCode::InternalServerError,
            501 => StatusCode::NotImplemented,
            other => StatusCode::Other(other),
        }
    }

    /// The numeric code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::Other(code) => *code,
        }
    }

    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::Other(_) => "Error",
        }
    }
}

/// A file body, sent after the headers.
#[derive(Debug)]
pub struct Body {
    file: File,
    len: u64,
}

/// Represents an HTTP response.
#[derive(Debug)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The HTTP headers, in the order they are sent
    pub headers: Vec<(String, String)>,
    /// The response body, if any
    pub body: Option<Body>,
}

impl HttpResponse {
    /// Create a new HTTP response with the given status code.
    ///
    /// The `Date` header is set to the current time.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: vec![("Date".to_string(), format_date(Utc::now()))],
            body: None,
        }
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body to the first `len` bytes of an open file.
    pub fn with_file_body(mut self, file: File, len: u64) -> Self {
        self.body = Some(Body { file, len });
        self
    }

    /// Get a header value, case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialise the status line and headers, including the blank line.
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        // Add the status line
        let status_line = format!(
            "{HTTP_VERSION} {} {}\r\n",
            self.status.as_u16(),
            self.status.reason_phrase()
        );
        bytes.extend_from_slice(status_line.as_bytes());

        // Add the headers
        for (name, value) in &self.headers {
            let header_line = format!("{name}: {value}\r\n");
            bytes.extend_from_slice(header_line.as_bytes());
        }

        // Add the empty line that separates headers from body
        bytes.extend_from_slice(b"\r\n");

        bytes
    }

    /// Write the response and return the number of body bytes sent.
    ///
    /// Once the head is written the response is committed. If the file then
    /// yields fewer bytes than announced, an error is returned and the caller
    /// must drop the connection rather than send anything else.
    pub async fn write_to<W>(self, writer: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        writer.write_all(&self.head_bytes()).await?;

        let mut sent = 0;
        if let Some(Body { file, len }) = self.body {
            sent = tokio::io::copy(&mut file.take(len), writer).await?;
            if sent < len {
                return Err(Error::InternalError(format!(
                    "body truncated after {sent} of {len} bytes"
                )));
            }
        }

        writer.flush().await?;
        Ok(sent)
    }
}

/// Build a `200 OK` response for a resolved file.
///
/// HEAD responses carry the same headers as GET, including the full
/// `Content-Length`, but no body.
pub fn build_success(resource: ResolvedResource, include_body: bool, server_name: &str) -> HttpResponse {
    let response = HttpResponse::new(StatusCode::Ok)
        .with_header("Server", server_name)
        .with_header("Last-Modified", format_system_time(resource.last_modified))
        .with_header("Content-Length", resource.size.to_string())
        .with_header("Content-Type", resource.content_type);

    if include_body {
        response.with_file_body(resource.file, resource.size)
    } else {
        response
    }
}

/// Build a headers-only error response. Only `Date` is sent.
pub fn build_error(code: u16) -> HttpResponse {
    HttpResponse::new(StatusCode::from_u16(code))
}

/// Format a timestamp for a header.
pub fn format_date(time: DateTime<Utc>) -> String {
    time.format(DATE_FORMAT).to_string()
}

/// Format a filesystem timestamp with the same routine as [`format_date`].
pub fn format_system_time(time: SystemTime) -> String {
    format_date(DateTime::<Utc>::from(time))
}
