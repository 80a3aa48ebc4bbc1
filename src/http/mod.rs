//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! request handler.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod path;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use cors::finalize_headers;
pub use range::parse_range_header;
pub use response::{
    build_301_response, build_304_response, build_404_response, build_405_response,
    build_416_response, build_html_response, build_options_response,
};
