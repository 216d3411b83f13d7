//! Error types shared by the asset sources and the host binary.

use std::io;
use thiserror::Error;

/// Failure to open an asset.
///
/// Only two kinds exist: the asset is absent, or anything else went wrong
/// while opening or inspecting it.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to read asset '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Classify an I/O error raised while opening `key`.
    ///
    /// Errors meaning the path cannot name a file (a file used as a
    /// directory, an unrepresentable name) count as not found.
    pub fn from_io(key: &str, source: io::Error) -> Self {
        if matches!(
            source.kind(),
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput
        ) {
            Self::NotFound(key.to_string())
        } else {
            Self::Io {
                key: key.to_string(),
                source,
            }
        }
    }
}

/// Startup failures of the host binary.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to read specification file '{path}': {source}")]
    SpecFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to load assets from '{path}': {source}")]
    AssetsDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
