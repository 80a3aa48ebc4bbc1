//! Request handler module
//!
//! Dispatches requests, applies the root rewrite and serves files from the
//! root directory.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry points
pub use router::{handle_request, resolve_path};
