//! The drop-to-markdown adapter.
//!
//! Intercepts a file-drop gesture on the editing surface, validates that the
//! payload is an image, hands it to the asset store, and splices the
//! generated image reference into the document. Validation and ingestion
//! failures are terminal for the gesture and leave the document untouched.

use bytes::Bytes;
use miette::Diagnostic;
use mime_sniffer::MimeTypeSniffer;
use thiserror::Error;
use tracing::{debug, info};

use vellum_common::assets::{AssetStore, StoredAsset, UploadedFile, asset_url};
use vellum_common::error::IngestError;

use crate::document::Document;

/// One file carried by a drop gesture.
#[derive(Clone, Debug)]
pub struct DroppedFile {
    pub name: String,
    /// Media type as declared by the drop source, when it declared one.
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl DroppedFile {
    /// Declared media type, falling back to sniffing the payload bytes when
    /// the drop source did not declare one.
    pub fn media_type(&self) -> Option<String> {
        match &self.content_type {
            Some(declared) if !declared.is_empty() => Some(declared.clone()),
            _ => self.bytes.sniff_mime_type().map(str::to_string),
        }
    }
}

/// The full payload of a drop gesture, in drop order.
#[derive(Clone, Debug, Default)]
pub struct DropPayload {
    pub files: Vec<DroppedFile>,
}

impl DropPayload {
    pub fn single(file: DroppedFile) -> Self {
        Self { files: vec![file] }
    }
}

/// Why a drop gesture was rejected.
#[derive(Error, Debug, Diagnostic)]
pub enum DropError {
    /// The gesture carried no files at all.
    #[error("nothing to drop: the gesture carried no files")]
    #[diagnostic(code(vellum::drop::empty))]
    EmptyDrop,

    /// The first file is not an image.
    #[error("dropped file is not an image")]
    #[diagnostic(code(vellum::drop::not_an_image))]
    NotAnImage { found: Option<String> },

    /// Ingestion failed after validation passed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),
}

/// The markdown snippet referencing an ingested asset. The reference doubles
/// as the alt text, exactly as the generated link will round-trip through
/// the parser.
pub fn image_snippet(name: &str) -> String {
    format!("\n\n![{name}]({url})\n\n", url = asset_url(name))
}

/// Handles one drop gesture against `doc`.
///
/// Only the first file of the payload is considered. Ingestion completes (or
/// fails) before any document mutation is attempted, so a failed gesture
/// never leaves the document partially updated. Insertion is always
/// append-at-end, not at the cursor.
pub async fn handle_drop<S: AssetStore>(
    doc: &mut Document,
    payload: DropPayload,
    store: &S,
) -> Result<StoredAsset, DropError> {
    let Some(file) = payload.files.into_iter().next() else {
        return Err(DropError::EmptyDrop);
    };

    match file.media_type() {
        Some(media_type) if media_type.starts_with("image/") => {
            debug!(name = %file.name, %media_type, "accepting dropped image");
        }
        found => return Err(DropError::NotAnImage { found }),
    }

    let asset = store
        .ingest(UploadedFile {
            name: file.name,
            bytes: file.bytes,
        })
        .await?;

    doc.append(&image_snippet(&asset.name));
    info!(name = %asset.name, len = asset.len, "spliced image reference into document");
    Ok(asset)
}
