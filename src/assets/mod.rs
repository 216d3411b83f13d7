//! Asset source module
//!
//! Read-only file trees the documentation handler serves from:
//! - `AssetFs`: immutable in-memory tree, built once (bundled UI, eager directory load, builder)
//! - `DiskAssets`: live directory read on every request, for working on the UI itself

mod bundle;
mod disk;

pub use bundle::{bundled, AssetFs, AssetFsBuilder};
pub use disk::DiskAssets;

use crate::error::AssetError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;

/// Root document of the UI, served for the mount root and SPA fallback
pub const ENTRY_DOCUMENT: &str = "index.html";

/// An opened asset, ready to be written out
#[derive(Debug, Clone)]
pub struct AssetFile {
    /// Lookup key the asset was opened under
    pub name: String,
    pub data: Bytes,
    /// Modification time, if the source knows it
    pub modified: Option<DateTime<Utc>>,
    /// Quoted entity tag for conditional requests
    pub etag: String,
}

impl AssetFile {
    /// File extension of the asset name, without the dot
    pub fn extension(&self) -> Option<&str> {
        let file_name = self.name.rsplit('/').next()?;
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() {
            None
        } else {
            Some(ext)
        }
    }
}

/// A read-only tree of assets addressed by normalized relative keys.
///
/// Keys never start with `/` and never contain `.` or `..` segments.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn open(&self, key: &str) -> Result<AssetFile, AssetError>;

    /// Short human-readable origin, used in startup logs
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> AssetFile {
        AssetFile {
            name: name.to_string(),
            data: Bytes::new(),
            modified: None,
            etag: String::new(),
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(file("app.js").extension(), Some("js"));
        assert_eq!(file("css/theme.min.css").extension(), Some("css"));
        assert_eq!(file("LICENSE").extension(), None);
        assert_eq!(file(".hidden").extension(), None);
        assert_eq!(file("v1.2/readme").extension(), None);
    }
}
