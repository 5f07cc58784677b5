//! Path resolution and file loading
//!
//! This module turns a request path into the bytes and metadata of a file
//! under the document root, or a uniform not-found verdict.

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use tokio::io::AsyncReadExt;

use crate::http::mime::{ExtensionClassifier, MimeClassifier};

/// Outcome of resolving a request path.
///
/// Every failure (missing file, permission denied, directory target,
/// traversal attempt) collapses into `NotFound`; nothing more specific is
/// surfaced to the client.
pub enum Resolved {
    Found(ResolvedFile),
    NotFound,
}

/// A file successfully loaded from the document root.
pub struct ResolvedFile {
    /// Full filesystem path the request resolved to
    pub path: PathBuf,
    /// Entire file contents
    pub contents: Bytes,
    /// Exact byte length of `contents`
    pub length: u64,
    /// Content type derived from the path
    pub mime_type: &'static str,
}

/// Resolves request paths against a document root.
pub struct FileResolver {
    root: PathBuf,
    classifier: Box<dyn MimeClassifier>,
}

impl FileResolver {
    /// Creates a resolver rooted at `root` with extension-based MIME
    /// detection.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            classifier: Box::new(ExtensionClassifier),
        }
    }

    /// Replaces the MIME classifier.
    pub fn with_classifier(mut self, classifier: Box<dyn MimeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Resolves a request path to a fully loaded file.
    pub async fn resolve(&self, request_path: &str) -> Resolved {
        let relative = match sanitize(request_path) {
            Some(p) => p,
            None => {
                tracing::debug!(path = %request_path, "Rejected request path");
                return Resolved::NotFound;
            }
        };

        let full = self.root.join(relative);

        match read_file(&full).await {
            Ok(contents) => {
                let length = contents.len() as u64;
                Resolved::Found(ResolvedFile {
                    mime_type: self.classifier.classify(&full),
                    path: full,
                    contents,
                    length,
                })
            }
            Err(e) => {
                tracing::debug!(path = %full.display(), error = %e, "Failed to open file");
                Resolved::NotFound
            }
        }
    }
}

/// Reads an entire file into memory, sized from its metadata.
async fn read_file(path: &Path) -> std::io::Result<Bytes> {
    let mut file = tokio::fs::File::open(path).await?;
    let metadata = file.metadata().await?;

    if !metadata.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }

    let mut contents = Vec::with_capacity(metadata.len() as usize);
    file.read_to_end(&mut contents).await?;

    Ok(Bytes::from(contents))
}

/// Strips the leading slash and rejects anything that could escape the
/// document root. Only plain path components survive; `..`, absolute
/// paths, and the bare `/` all resolve to nothing.
fn sanitize(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');

    if trimmed.is_empty() {
        return None;
    }

    let path = Path::new(trimmed);
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            _ => return None,
        }
    }

    Some(path.to_path_buf())
}
