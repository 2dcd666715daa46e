//! songlib-api library - Song Catalog service
//!
//! CRUD catalog of songs over a SQLite store: list with dynamic
//! filter/sort/pagination, create with external metadata enrichment,
//! selective field update, delete, and paginated lyric retrieval.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};
use crate::services::music_info::MusicInfoClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Client for the external music info service
    pub music_info: MusicInfoClient,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, music_info: MusicInfoClient) -> Self {
        Self {
            db,
            music_info,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/songs", get(api::list_songs).post(api::create_song))
        .route("/songs/generate", get(api::generate_songs))
        .route(
            "/songs/:id",
            get(api::get_song).put(api::update_song).delete(api::delete_song),
        )
        .route("/songs/:id/lyrics", get(api::song_lyrics))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
