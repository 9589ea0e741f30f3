//! Meme Protocol web server: activity API, root page with the recent-activity
//! widget, and the FAQ.

mod handlers;
mod pages;

use axum::{Router, routing::get};
use memeproto_core::{Settings, telemetry};
use memeproto_storage::{self as storage, PgPool};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub pool: PgPool,
    pub settings: Settings,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init();
    let settings = Settings::from_env()?;

    tracing::info!("Starting Meme Protocol API Server");

    let pool = storage::connect(&settings.database_url)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.api_port));

    let state = Arc::new(AppState { pool, settings });
    let app = router(state);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/faq", get(pages::faq))
        .route("/api/activity", get(handlers::get_activity))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
