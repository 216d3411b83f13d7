//! Request handler module
//!
//! Routing in front of the documentation handler, and the handler itself.

pub mod docs;
pub mod router;

// Re-export main entry points
pub use docs::DocsHandler;
pub use router::{handle_request, RequestContext};
