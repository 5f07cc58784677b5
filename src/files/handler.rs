use std::time::SystemTime;

use crate::config::FilesConfig;
use crate::files::resolver::{FileResolver, Resolved};
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Turns parsed requests into static-file responses.
///
/// Shared immutably across connection tasks; holds no per-request state.
pub struct StaticFileHandler {
    resolver: FileResolver,
}

impl StaticFileHandler {
    pub fn new(cfg: FilesConfig) -> Self {
        Self {
            resolver: FileResolver::new(cfg.root),
        }
    }

    /// Produces the response for one request: 200 with the file bytes, or
    /// the minimal 404.
    ///
    /// A 200 carries exactly `Date`, `Connection: close`, `Content-Type`
    /// and `Content-Length`, in that order on the wire.
    pub async fn handle(&self, request: &Request) -> Response {
        match self.resolver.resolve(&request.path).await {
            Resolved::Found(file) => {
                tracing::info!(
                    method = ?request.method,
                    path = %request.path,
                    length = file.length,
                    status = 200,
                    "Serving file"
                );

                ResponseBuilder::new(StatusCode::Ok)
                    .header("Date", httpdate::fmt_http_date(SystemTime::now()))
                    .header("Connection", "close")
                    .header("Content-Type", file.mime_type)
                    .header("Content-Length", file.length.to_string())
                    .body(file.contents.to_vec())
                    .build()
            }

            Resolved::NotFound => {
                tracing::info!(
                    method = ?request.method,
                    path = %request.path,
                    status = 404,
                    "File not found"
                );

                Response::not_found()
            }
        }
    }
}
