//! Error types for asset ingestion.

use miette::Diagnostic;
use thiserror::Error;

/// Failures of the asset ingestion service.
///
/// Ingestion is terminal for the triggering gesture: callers must surface
/// these to the user and must not mutate the document afterwards.
#[derive(Error, Debug, Diagnostic)]
pub enum IngestError {
    /// No file was supplied with the ingestion request.
    #[error("No file uploaded")]
    #[diagnostic(code(vellum::ingest::missing_payload))]
    MissingPayload,

    /// The name would escape the store root after sanitization.
    #[error("refusing to store asset under unsafe name {name:?}")]
    #[diagnostic(code(vellum::ingest::unsafe_name))]
    UnsafeName { name: String },

    /// The byte payload could not be persisted.
    #[error("failed to persist asset {name:?}")]
    #[diagnostic(code(vellum::ingest::storage_write_failed))]
    StorageWriteFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Whether the failure is correctable by the uploader (as opposed to a
    /// storage-side fault).
    pub fn is_user_error(&self) -> bool {
        match self {
            IngestError::MissingPayload | IngestError::UnsafeName { .. } => true,
            IngestError::StorageWriteFailed { .. } => false,
        }
    }
}
