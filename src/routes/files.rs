//! Static file serving under a configured base directory
//!
//! File names come straight from the request path. Only plain path segments
//! are accepted, so a name can never resolve outside the base directory.

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Permissions for newly created files: owner read-write, world-readable.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Failures while resolving or touching a file
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file serving is disabled (no base directory)")]
    NotConfigured,

    #[error("rejected file name {0:?}")]
    InvalidName(String),

    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),

    #[error("storage failure on {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// The status this failure is reported to the client with.
    pub fn status(&self) -> StatusCode {
        match self {
            FileError::Storage { .. } => StatusCode::InternalServerError,
            _ => StatusCode::NotFound,
        }
    }
}

/// Read/write access to files below an optional base directory
#[derive(Debug, Clone, Default)]
pub struct StaticFiles {
    base_dir: Option<PathBuf>,
}

impl StaticFiles {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// A handler that answers every file request with 404.
    pub fn disabled() -> Self {
        Self { base_dir: None }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Joins `name` onto the base directory.
    ///
    /// `.` segments are dropped. `..`, absolute paths and names with no
    /// segments at all are rejected.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        let base = self.base_dir.as_ref().ok_or(FileError::NotConfigured)?;

        let mut resolved = base.clone();
        let mut segments = 0;

        for component in Path::new(name).components() {
            match component {
                Component::Normal(segment) => {
                    resolved.push(segment);
                    segments += 1;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FileError::InvalidName(name.to_string()));
                }
            }
        }

        if segments == 0 {
            return Err(FileError::InvalidName(name.to_string()));
        }

        Ok(resolved)
    }

    /// Reads a whole file. Missing paths and directories are `NotFound`.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, FileError> {
        let path = self.resolve(name)?;

        match tokio::fs::metadata(&path).await {
            Ok(meta) if !meta.is_dir() => {}
            _ => return Err(FileError::NotFound(path)),
        }

        tokio::fs::read(&path)
            .await
            .map_err(|source| FileError::Storage { path, source })
    }

    /// Creates or truncates a file and writes `contents` to it.
    ///
    /// Concurrent writes to the same name are not coordinated; whichever
    /// finishes last wins.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileError> {
        let path = self.resolve(name)?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);

        let result = async {
            let mut file = options.open(&path).await?;
            file.write_all(contents).await?;
            file.flush().await
        }
        .await;

        result.map_err(|source| FileError::Storage { path, source })
    }

    /// `GET /files/{name}`
    pub async fn serve_read(&self, req: &Request, name: &str) -> Response {
        match self.read(name).await {
            Ok(contents) => Response::octets(&req.version, contents),
            Err(e) => Self::failure(req, name, e),
        }
    }

    /// `POST /files/{name}`
    pub async fn serve_write(&self, req: &Request, name: &str) -> Response {
        match self.write(name, &req.body).await {
            Ok(()) => {
                tracing::debug!(file = name, bytes = req.body.len(), "File written");
                Response::empty(&req.version, StatusCode::Created)
            }
            Err(e) => Self::failure(req, name, e),
        }
    }

    fn failure(req: &Request, name: &str, e: FileError) -> Response {
        match &e {
            FileError::Storage { .. } => tracing::error!(file = name, error = %e, "File I/O failed"),
            _ => tracing::debug!(file = name, error = %e, "File request refused"),
        }
        Response::empty(&req.version, e.status())
    }
}
