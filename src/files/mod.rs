//! Static file serving
//!
//! This module maps request paths to files under the document root and
//! turns them into HTTP responses.

pub mod handler;
pub mod resolver;

pub use handler::StaticFileHandler;
pub use resolver::{FileResolver, Resolved, ResolvedFile};
