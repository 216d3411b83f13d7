//! Live directory source
//!
//! Every request opens the file from disk, so edits to the UI show up without
//! a restart.

use super::{AssetFile, AssetSource};
use crate::error::AssetError;
use crate::http::cache;
use crate::logger;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Serves assets straight from a directory
#[derive(Debug, Clone)]
pub struct DiskAssets {
    root: PathBuf,
}

impl DiskAssets {
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        Ok(Self { root })
    }
}

#[async_trait]
impl AssetSource for DiskAssets {
    async fn open(&self, key: &str) -> Result<AssetFile, AssetError> {
        // No file name can hold a NUL byte
        if key.contains('\0') {
            return Err(AssetError::NotFound(key.to_string()));
        }
        let path = self.root.join(key);

        // Symlinks may still point outside the root
        let canonical = fs::canonicalize(&path)
            .await
            .map_err(|e| AssetError::from_io(key, e))?;
        if !canonical.starts_with(&self.root) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {key} -> {}",
                canonical.display()
            ));
            return Err(AssetError::NotFound(key.to_string()));
        }

        let mut file = fs::File::open(&canonical)
            .await
            .map_err(|e| AssetError::from_io(key, e))?;

        let metadata = file.metadata().await.map_err(|source| AssetError::Io {
            key: key.to_string(),
            source,
        })?;
        if metadata.is_dir() {
            return Err(AssetError::NotFound(key.to_string()));
        }

        let mut data = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
        file.read_to_end(&mut data)
            .await
            .map_err(|source| AssetError::Io {
                key: key.to_string(),
                source,
            })?;

        let etag = cache::generate_etag(&data);
        Ok(AssetFile {
            name: key.to_string(),
            data: Bytes::from(data),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            etag,
        })
    }

    fn describe(&self) -> String {
        format!("directory {} (live)", self.root.display())
    }
}
