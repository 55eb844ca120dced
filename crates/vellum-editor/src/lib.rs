//! The vellum editing surface, minus the chrome.
//!
//! Holds the document model (the single source of truth the render pipeline
//! reads from) and the drop-to-markdown adapter that turns a file-drop
//! gesture into an ingested asset plus an appended image reference.

pub mod document;
pub mod drop;

pub use document::Document;
pub use drop::{DropError, DropPayload, DroppedFile, handle_drop, image_snippet};
