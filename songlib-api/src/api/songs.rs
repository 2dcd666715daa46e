//! Song catalog HTTP handlers
//!
//! Binding, pagination validation, and error-to-status mapping live
//! here; the handlers delegate to the store and the catalog services.
//! Out-of-range page/limit values are rejected with a 400, never
//! silently clamped.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db::query::{SongFilter, SortField, SortOrder};
use crate::db::songs::{self, Song, UpdateSong};
use crate::services::catalog;
use crate::{ApiError, ApiResult, AppState};

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

fn default_generate_count() -> i64 {
    10
}

/// Reject out-of-range pagination values before touching the store
fn validate_pagination(page: i64, limit: i64) -> Result<(), ApiError> {
    if page < 1 {
        return Err(ApiError::BadRequest("page must be at least 1".to_string()));
    }
    if !(1..=100).contains(&limit) {
        return Err(ApiError::BadRequest(
            "limit must be between 1 and 100".to_string(),
        ));
    }
    Ok(())
}

/// Query parameters for GET /songs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSongsQuery {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,

    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Song list response
#[derive(Debug, Serialize)]
pub struct SongListResponse {
    pub data: Vec<Song>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Request body for POST /songs
#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub group: String,
    pub song: String,
}

/// Status response for mutating operations
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Query parameters for paginated endpoints without filters
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Lyrics page response
#[derive(Debug, Serialize)]
pub struct LyricsResponse {
    pub verses: Vec<String>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Query parameters for GET /songs/generate
#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    #[serde(default = "default_generate_count")]
    pub count: i64,
}

/// GET /songs
///
/// List songs matching the optional filter, sorted and paginated.
pub async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<ListSongsQuery>,
) -> ApiResult<Json<SongListResponse>> {
    debug!("received a request to list songs");
    validate_pagination(query.page, query.limit)?;

    let filter = SongFilter {
        group: query.group,
        song: query.song,
        release_date: query.release_date,
        text: query.text,
        link: query.link,
        sort_by: query.sort_by.as_deref().and_then(SortField::parse),
        sort_order: query
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default(),
    };

    let (data, total) = songs::list_songs(&state.db, &filter, query.page, query.limit).await?;

    Ok(Json(SongListResponse {
        data,
        total,
        page: query.page,
        limit: query.limit,
    }))
}

/// POST /songs
///
/// Create a song, enriching it through the music info service.
pub async fn create_song(
    State(state): State<AppState>,
    Json(payload): Json<CreateSongRequest>,
) -> ApiResult<Json<StatusResponse>> {
    if payload.group.trim().is_empty() || payload.song.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "group and song are required".to_string(),
        ));
    }

    info!(group = %payload.group, song = %payload.song, "attempting song creation");

    catalog::create_song(&state.db, &state.music_info, &payload.group, &payload.song).await?;

    Ok(Json(StatusResponse {
        status: "song created".to_string(),
    }))
}

/// GET /songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Song>> {
    debug!(id, "received a request to get a song");

    let song = songs::get_song(&state.db, id).await?;
    Ok(Json(song))
}

/// PUT /songs/:id
///
/// Selectively update the fields present in the body.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateSong>,
) -> ApiResult<Json<StatusResponse>> {
    debug!(id, "received a request to update a song");

    songs::update_song(&state.db, id, &input).await?;

    Ok(Json(StatusResponse {
        status: "song updated".to_string(),
    }))
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<StatusResponse>> {
    debug!(id, "received a request to delete a song");

    songs::delete_song(&state.db, id).await?;

    Ok(Json(StatusResponse {
        status: "song deleted".to_string(),
    }))
}

/// GET /songs/:id/lyrics
///
/// Return one page of the song's verses.
pub async fn song_lyrics(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<LyricsResponse>> {
    debug!(id, "received a request for song lyrics");
    validate_pagination(query.page, query.limit)?;

    let lyrics = catalog::song_lyrics(&state.db, id, query.page, query.limit).await?;

    Ok(Json(LyricsResponse {
        verses: lyrics.verses,
        total: lyrics.total,
        page: query.page,
        limit: query.limit,
    }))
}

/// GET /songs/generate
///
/// Insert randomly assembled songs for manual testing.
pub async fn generate_songs(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> ApiResult<Json<StatusResponse>> {
    if !(1..=100).contains(&query.count) {
        return Err(ApiError::BadRequest(
            "count must be between 1 and 100".to_string(),
        ));
    }

    let inserted = catalog::generate_songs(&state.db, query.count).await?;

    Ok(Json(StatusResponse {
        status: format!("generated {inserted} songs"),
    }))
}
