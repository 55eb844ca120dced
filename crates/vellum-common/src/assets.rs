//! Asset naming, addressing, and storage.
//!
//! An asset is a named binary blob created from an uploaded file. The
//! reference returned by ingestion is the sanitized file name; every consumer
//! builds the public path from the same [`ASSET_ROOT`] prefix, so the
//! ingestion side and the render side can never disagree on addressing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use crate::error::IngestError;

/// Public path prefix under which ingested assets are reachable.
pub const ASSET_ROOT: &str = "/uploads/";

/// Builds the public path for an ingested asset name.
pub fn asset_url(name: &str) -> String {
    format!("{ASSET_ROOT}{name}")
}

/// Collapses every run of whitespace in a file name to a single hyphen.
///
/// Nothing else is normalized: case, extension, and collisions are left
/// alone, so the reference stays recognizably the uploaded name.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

/// A file payload handed to the ingestion service.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    /// Original file name as supplied by the uploader.
    pub name: String,
    /// Raw file contents.
    pub bytes: Bytes,
}

/// A successfully ingested asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAsset {
    /// Sanitized storage name; doubles as the markdown reference.
    pub name: String,
    /// Byte length of the stored payload.
    pub len: usize,
}

impl StoredAsset {
    /// Public path of the asset, rooted at [`ASSET_ROOT`].
    pub fn url(&self) -> String {
        asset_url(&self.name)
    }
}

/// The asset ingestion service: derives a storage name, persists the bytes,
/// and returns the reference usable inside markdown.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn ingest(&self, file: UploadedFile) -> Result<StoredAsset, IngestError>;
}

/// Filesystem-backed asset store writing into a single root directory.
///
/// Writes are whole-buffer and overwrite any existing asset of the same
/// name; last write wins and no versioning or deletion path exists.
#[derive(Clone, Debug)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!(root = %root.display(), "opening asset store");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn storage_name(file: &UploadedFile) -> Result<String, IngestError> {
        if file.name.trim().is_empty() {
            return Err(IngestError::MissingPayload);
        }
        let name = sanitize_file_name(&file.name);
        // The sanitizer is deliberately minimal, so the write path itself
        // refuses anything that could resolve outside the store root.
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(IngestError::UnsafeName { name });
        }
        Ok(name)
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn ingest(&self, file: UploadedFile) -> Result<StoredAsset, IngestError> {
        let name = Self::storage_name(&file)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| IngestError::StorageWriteFailed {
                name: name.clone(),
                source,
            })?;
        tokio::fs::write(self.root.join(&name), &file.bytes)
            .await
            .map_err(|source| IngestError::StorageWriteFailed {
                name: name.clone(),
                source,
            })?;
        info!(name, len = file.bytes.len(), "stored asset");
        Ok(StoredAsset {
            name,
            len: file.bytes.len(),
        })
    }
}

/// In-memory asset store. Useful in tests and anywhere persistence across
/// restarts does not matter.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Bytes> {
        self.blobs.lock().unwrap().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn ingest(&self, file: UploadedFile) -> Result<StoredAsset, IngestError> {
        let name = FsAssetStore::storage_name(&file)?;
        let len = file.bytes.len();
        self.blobs.lock().unwrap().insert(name.clone(), file.bytes);
        Ok(StoredAsset { name, len })
    }
}
