//! OpenAPI documentation viewer
//!
//! Serves a bundled Swagger UI together with one specification document over
//! HTTP/1.1. The binary wires these modules together; the library exposes
//! them for embedding the handler in another hyper service.

pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use crate::assets::{AssetFs, AssetSource, DiskAssets};
pub use crate::config::{AppState, Config};
pub use crate::error::{AssetError, StartupError};
pub use crate::handler::DocsHandler;
