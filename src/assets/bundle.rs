//! In-memory asset tree
//!
//! Populated once at startup and never mutated afterwards; every request reads
//! the same `Arc<AssetFs>` without locking.

use super::{AssetFile, AssetSource};
use crate::error::AssetError;
use crate::http::cache;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use rust_embed::Embed;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, OnceLock};

#[derive(Embed)]
#[folder = "ui/"]
struct BundledUi;

#[derive(Debug, Clone)]
struct Asset {
    data: Bytes,
    modified: Option<DateTime<Utc>>,
    etag: String,
}

impl Asset {
    fn new(data: Bytes, modified: Option<DateTime<Utc>>) -> Self {
        let etag = cache::generate_etag(&data);
        Self {
            data,
            modified,
            etag,
        }
    }
}

/// Immutable map from relative path to asset content
#[derive(Debug, Default)]
pub struct AssetFs {
    files: HashMap<String, Asset>,
}

impl AssetFs {
    pub fn builder() -> AssetFsBuilder {
        AssetFsBuilder::default()
    }

    /// Build from a `rust-embed` bundle
    pub fn from_embed<E: Embed>() -> Self {
        let mut builder = Self::builder();
        for key in E::iter() {
            let Some(file) = E::get(&key) else {
                continue;
            };
            let data = match file.data {
                Cow::Borrowed(bytes) => Bytes::from_static(bytes),
                Cow::Owned(bytes) => Bytes::from(bytes),
            };
            let modified = file
                .metadata
                .last_modified()
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0));
            builder = builder.file_with_mtime(&key, data, modified);
        }
        builder.build()
    }

    /// Read a whole directory tree into memory
    pub fn load_dir(root: &Path) -> io::Result<Self> {
        let mut builder = Self::builder();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                let metadata = entry.metadata()?;
                if metadata.is_dir() {
                    pending.push(path);
                    continue;
                }

                let Ok(relative) = path.strip_prefix(root) else {
                    continue;
                };
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                let data = std::fs::read(&path)?;
                let modified = metadata.modified().ok().map(DateTime::<Utc>::from);
                builder = builder.file_with_mtime(&key, Bytes::from(data), modified);
            }
        }

        Ok(builder.build())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }
}

#[async_trait]
impl AssetSource for AssetFs {
    async fn open(&self, key: &str) -> Result<AssetFile, AssetError> {
        let asset = self
            .files
            .get(key)
            .ok_or_else(|| AssetError::NotFound(key.to_string()))?;

        Ok(AssetFile {
            name: key.to_string(),
            data: asset.data.clone(),
            modified: asset.modified,
            etag: asset.etag.clone(),
        })
    }

    fn describe(&self) -> String {
        format!("in-memory bundle ({} files)", self.len())
    }
}

/// Collects entries for an `AssetFs`
#[derive(Debug, Default)]
pub struct AssetFsBuilder {
    files: HashMap<String, Asset>,
}

impl AssetFsBuilder {
    #[must_use]
    pub fn file(self, key: &str, data: impl Into<Bytes>) -> Self {
        self.file_with_mtime(key, data, None)
    }

    #[must_use]
    pub fn file_with_mtime(
        mut self,
        key: &str,
        data: impl Into<Bytes>,
        modified: Option<DateTime<Utc>>,
    ) -> Self {
        let key = key.trim_start_matches('/').to_string();
        self.files.insert(key, Asset::new(data.into(), modified));
        self
    }

    pub fn build(self) -> AssetFs {
        AssetFs { files: self.files }
    }
}

/// The UI bundle compiled into the binary, loaded on first use
pub fn bundled() -> Arc<AssetFs> {
    static BUNDLED: OnceLock<Arc<AssetFs>> = OnceLock::new();
    Arc::clone(BUNDLED.get_or_init(|| Arc::new(AssetFs::from_embed::<BundledUi>())))
}
