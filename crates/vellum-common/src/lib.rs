//! Shared building blocks for the vellum workspace: the error taxonomy,
//! asset naming and addressing, the asset store, and tracing setup.

pub mod assets;
pub mod error;
pub mod telemetry;

pub use assets::{
    ASSET_ROOT, AssetStore, FsAssetStore, MemoryAssetStore, StoredAsset, UploadedFile, asset_url,
};
pub use error::IngestError;
