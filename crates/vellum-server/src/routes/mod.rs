use axum::{
    Router,
    routing::{get, post},
};

pub mod health_check;
pub mod render;
pub mod upload;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health_check", get(health_check::health_check))
        .route("/api/upload", post(upload::upload))
        .route("/api/render", post(render::render))
}
