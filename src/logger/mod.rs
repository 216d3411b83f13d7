//! Logger module
//!
//! Thin facade over `tracing`:
//! - Server lifecycle logging
//! - Access logging with multiple formats (target `access`)
//! - Error and warning logging

mod format;

pub use format::{AccessLogEntry, AccessLogFormat};

use crate::config::LoggingConfig;
use crate::error::StartupError;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level. Should be called once at startup.
pub fn init(config: &LoggingConfig) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| StartupError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| StartupError::Logging(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, base_path: &str, assets: &str) {
    tracing::info!("OpenAPI viewer listening on http://{addr}{base_path}/");
    tracing::info!("Serving UI assets from {assets}");
    tracing::info!("Specification available at http://{addr}{base_path}/spec");
}

pub fn log_spec_loaded(path: &str, size: usize, is_json: bool) {
    if is_json {
        tracing::info!("Loaded specification '{path}' ({size} bytes)");
    } else {
        tracing::warn!("Specification '{path}' ({size} bytes) is not valid JSON, serving it as-is");
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("Accepted connection from {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &AccessLogFormat) {
    tracing::info!(target: "access", "{}", entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    tracing::info!("Shutdown requested, stopped accepting ({active_connections} connections still open)");
}
