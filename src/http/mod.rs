//! HTTP protocol layer module
//!
//! Path normalization, conditional requests, ranges, MIME types and response
//! builders, decoupled from the documentation handler itself.

pub mod cache;
pub mod mime;
pub mod path;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use range::parse_range_header;
pub use response::{
    build_404_response, build_405_response, build_500_response, build_options_response,
    build_redirect_response,
};
