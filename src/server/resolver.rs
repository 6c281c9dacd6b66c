//! Mapping of request targets to files under the document root.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, warn};
use tokio::fs::{self, File};

use crate::server::content_type::content_type_for;
use crate::server::error::Error;

/// The file served for a bare `/` target.
pub const INDEX_TARGET: &str = "/index.html";

/// A request target resolved to an open, readable file.
///
/// Built fresh for every request. The open handle is the one the body is
/// streamed from, so the metadata describes the bytes that are sent.
#[derive(Debug)]
pub struct ResolvedResource {
    /// Canonical filesystem path of the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    /// Last modification time.
    pub last_modified: SystemTime,
    /// MIME type derived from the extension.
    pub content_type: &'static str,
    /// The open file.
    pub file: File,
}

/// Resolves request targets against a fixed document root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for the given document root.
    ///
    /// The root is canonicalised here, once, and must be a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref();
        let root = std::fs::canonicalize(root)
            .map_err(|e| Error::Config(format!("document root {}: {e}", root.display())))?;
        if !root.is_dir() {
            return Err(Error::Config(format!("document root {} is not a directory", root.display())));
        }
        Ok(Self { root })
    }

    /// The canonical document root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turn a request target into a path relative to the document root.
    ///
    /// Checks the leading `/` and rewrites `/` to the index file. No
    /// filesystem access happens here.
    pub fn relative_path<'a>(&self, target: &'a str) -> Result<&'a str, Error> {
        if !target.starts_with('/') {
            return Err(Error::InvalidTarget(target.to_string()));
        }
        let target = if target == "/" { INDEX_TARGET } else { target };
        Ok(&target[1..])
    }

    /// Resolve a request target to a readable regular file under the root.
    pub async fn resolve(&self, target: &str) -> Result<ResolvedResource, Error> {
        let relative = self.relative_path(target)?;
        let joined = self.root.join(relative);

        let path = fs::canonicalize(&joined)
            .await
            .map_err(|e| not_found(target, &e))?;

        if !path.starts_with(&self.root) {
            warn!("Rejected target {target} resolving outside the document root");
            return Err(Error::NotFound(target.to_string()));
        }

        let file = File::open(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => not_found(target, &e),
            _ => Error::IoError(e),
        })?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            debug!("Target {target} is not a regular file");
            return Err(Error::NotFound(target.to_string()));
        }

        let last_modified = metadata.modified()?;
        let content_type = content_type_for(&path);

        Ok(ResolvedResource {
            path,
            size: metadata.len(),
            last_modified,
            content_type,
            file,
        })
    }
}

fn not_found(target: &str, err: &io::Error) -> Error {
    debug!("Cannot open {target}: {err}");
    Error::NotFound(target.to_string())
}
