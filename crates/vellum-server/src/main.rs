pub mod api_error;
pub mod config;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};

use config::Config;
use state::AppState;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", default_value = "vellum.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let config = initialize()?;
    // Spin up our server.
    info!("Starting server on {}", config.core.listen_addr);
    let listener = TcpListener::bind(&config.core.listen_addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, router(config))
        .await
        .expect("Failed to start server");
    Ok(())
}

pub fn router(cfg: Config) -> Router {
    let app_state = AppState::new(cfg);
    // Ingested assets are served back from the same directory the store
    // writes into, under the shared /uploads/ prefix.
    let serve_uploads = ServeDir::new(&app_state.cfg().core.upload_dir);

    // The order of the layers is important. The first layer is the
    // outermost layer.
    Router::new()
        .merge(routes::router())
        .nest_service("/uploads", serve_uploads)
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(15)))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub fn initialize() -> miette::Result<Config> {
    miette::set_panic_hook();
    vellum_common::telemetry::init("info,tower_http=debug");
    let cli = Cli::parse();
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("{e}; starting with default configuration");
            Config::default()
        }
    };
    Ok(config)
}
