//! Static file store confined to a single served directory.
//!
//! Names are looked up as literal entries of the directory; there is no
//! recursion into subdirectories. Names that could step outside the
//! directory (`.`, `..`, anything with a path separator) are treated as not
//! found. Concurrent writes to the same name race and the last writer wins.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::http::response::{OCTET_STREAM, Response, StatusCode};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("no served directory configured")]
    NotConfigured,

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub fn status(&self) -> StatusCode {
        match self {
            FileError::NotConfigured | FileError::NotFound(_) => StatusCode::NotFound,
            FileError::Io { .. } => StatusCode::InternalServerError,
        }
    }

    fn io(path: &Path, source: io::Error) -> Self {
        FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Reads the whole content of the entry called `name`.
    pub async fn get(&self, name: &str) -> Result<Vec<u8>, FileError> {
        let root = self.root.as_deref().ok_or(FileError::NotConfigured)?;
        if !is_plain_name(name) {
            return Err(FileError::NotFound(name.to_string()));
        }

        // An unreadable directory is reported as a missing file.
        let mut entries = match tokio::fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %root.display(), error = %e, "Could not read served directory");
                return Err(FileError::NotFound(name.to_string()));
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %root.display(), error = %e, "Directory listing interrupted");
                    break;
                }
            };

            if entry.file_name() != name {
                continue;
            }

            let path = entry.path();
            return tokio::fs::read(&path).await.map_err(|e| FileError::io(&path, e));
        }

        Err(FileError::NotFound(name.to_string()))
    }

    /// Creates or truncates `name` and writes `content` in full.
    pub async fn put(&self, name: &str, content: &[u8]) -> Result<(), FileError> {
        let root = self.root.as_deref().ok_or(FileError::NotConfigured)?;
        if !is_plain_name(name) {
            return Err(FileError::NotFound(name.to_string()));
        }

        let path = root.join(name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| FileError::io(&path, e))
    }

    /// `GET /files/{name}`: 200 with the file bytes, or an empty 404/500.
    pub async fn get_response(&self, name: &str) -> Response {
        match self.get(name).await {
            Ok(content) => Response::with_body(StatusCode::Ok, OCTET_STREAM, content),
            Err(e) => error_response(e),
        }
    }

    /// `POST /files/{name}`: 201 echoing the written bytes, or an empty 404/500.
    pub async fn put_response(&self, name: &str, content: Vec<u8>) -> Response {
        match self.put(name, &content).await {
            Ok(()) => Response::with_body(StatusCode::Created, OCTET_STREAM, content),
            Err(e) => error_response(e),
        }
    }
}

fn error_response(e: FileError) -> Response {
    let status = e.status();
    match &e {
        FileError::Io { .. } => tracing::error!(error = %e, "File operation failed"),
        _ => tracing::debug!(error = %e, "File not served"),
    }
    Response::with_body(status, OCTET_STREAM, Vec::new())
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
