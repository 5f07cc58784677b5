//! MIME type detection based on file extensions.

use std::path::Path;

/// Maps a file path to a MIME content-type string.
///
/// The seam for richer detection (content sniffing, magic bytes); the
/// server only wires up [`ExtensionClassifier`].
pub trait MimeClassifier: Send + Sync {
    fn classify(&self, path: &Path) -> &'static str;
}

/// Classifies by file extension with a static lookup table.
pub struct ExtensionClassifier;

impl MimeClassifier for ExtensionClassifier {
    fn classify(&self, path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        from_extension(ext)
    }
}

/// Looks up the MIME type for a file extension (ASCII case-insensitive).
///
/// Unknown extensions map to `application/octet-stream`.
pub fn from_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}
