use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use vellum_common::error::IngestError;

/// Custom error type for the API.
#[derive(Error, Debug, Diagnostic)]
pub enum ApiError {
    /// The upload request carried no `file` field.
    #[error("No file uploaded")]
    MissingFile,

    /// The multipart body could not be read.
    #[error("Invalid upload request.")]
    InvalidMultipart(#[from] MultipartError),

    /// Ingestion failed after the request was read.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),
}

#[derive(Serialize, Deserialize)]
pub struct ApiErrorResp {
    pub error: String,
}

// Logs the detailed error for telemetry and answers with a JSON body the
// editing surface can show inline.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_to_log = match &self {
            ApiError::MissingFile => "upload request carried no `file` field".to_string(),
            ApiError::InvalidMultipart(err) => err.to_string(),
            ApiError::Ingest(err) => format!("{}", err),
        };
        error!("{}", error_to_log);

        let status = match &self {
            ApiError::MissingFile | ApiError::InvalidMultipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(err) if err.is_user_error() => StatusCode::BAD_REQUEST,
            ApiError::Ingest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let resp = ApiErrorResp {
            error: self.to_string(),
        };

        (status, Json(resp)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_bad_request() {
        let resp = ApiError::MissingFile.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn user_correctable_ingest_errors_map_to_bad_request() {
        let resp = ApiError::from(IngestError::MissingPayload).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_map_to_internal_server_error() {
        let err = IngestError::StorageWriteFailed {
            name: "a.png".into(),
            source: std::io::Error::other("disk on fire"),
        };
        let resp = ApiError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
