use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct RenderRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct RenderResponse {
    pub html: String,
}

/// Server-side preview: renders document text to HTML. Parsing is total, so
/// this handler has no failure path of its own.
pub async fn render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Json<RenderResponse> {
    Json(RenderResponse {
        html: state.pipeline().render_html(&req.text),
    })
}
