//! setlist-web library - public browsing service for the archive
//!
//! Read-only: every handler only queries public events.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/events", get(api::list_events))
        .route("/api/events/:slug", get(api::get_event))
        .route("/api/songs", get(api::list_songs))
        .route("/api/songs/:slug", get(api::get_song));

    let pages = Router::new()
        .route("/", get(api::serve_index))
        .route("/events/:slug", get(api::serve_index))
        .route("/songs", get(api::serve_index))
        .route("/songs/:slug", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
