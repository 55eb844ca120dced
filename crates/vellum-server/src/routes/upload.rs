use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vellum_common::assets::{AssetStore, UploadedFile};

use crate::api_error::ApiError;
use crate::state::AppState;

#[derive(Serialize, Deserialize)]
pub struct UploadResp {
    pub filename: String,
}

/// Accepts a single-file multipart submission under the `file` field and
/// answers with the sanitized storage name. Ingestion completes before the
/// response is produced; a storage failure aborts the whole request.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResp>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            debug!(field = ?field.name(), "skipping unrelated multipart field");
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        let asset = state.store().ingest(UploadedFile { name, bytes }).await?;
        return Ok(Json(UploadResp {
            filename: asset.name,
        }));
    }
    Err(ApiError::MissingFile)
}
