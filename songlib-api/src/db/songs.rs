//! Song store: CRUD operations against the songs table
//!
//! Update and delete confirm the row exists before mutating, so callers
//! get a NotFound instead of having to interpret "0 rows affected".

use crate::db::query::{build_song_query, SongFilter, SONG_COLUMNS};
use serde::{Deserialize, Serialize};
use songlib_common::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::{debug, error, warn};

/// Song record
///
/// Lyric text is never serialized with the song itself; it is only
/// reachable through the lyrics endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    pub group: String,
    pub song: String,
    pub release_date: Option<String>,
    #[serde(skip_serializing)]
    pub text: Option<String>,
    pub link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields of a song about to be inserted (id is store-assigned)
#[derive(Debug, Clone)]
pub struct NewSong {
    pub group: String,
    pub song: String,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Partial update input; absent or empty fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSong {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

fn song_from_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        group: row.get("group_name"),
        song: row.get("song_name"),
        release_date: row.get("release_date"),
        text: row.get("text"),
        link: row.get("link"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("song with id {id} not found"))
}

/// Insert a song and return its store-assigned id
pub async fn insert_song(pool: &SqlitePool, song: &NewSong) -> Result<i64> {
    debug!(group = %song.group, song = %song.song, "inserting song");

    let result = sqlx::query(
        "INSERT INTO songs (group_name, song_name, release_date, text, link)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&song.group)
    .bind(&song.song)
    .bind(&song.release_date)
    .bind(&song.text)
    .bind(&song.link)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load a song by id; a missing row is a distinct NotFound condition
pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Song> {
    let row = sqlx::query(&format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(song_from_row(&row)),
        None => Err(not_found(id)),
    }
}

/// List songs matching the filter, plus the total match count
///
/// The total reflects the filter predicates but not pagination, so the
/// caller can report how many rows exist across all pages.
pub async fn list_songs(
    pool: &SqlitePool,
    filter: &SongFilter,
    page: i64,
    limit: i64,
) -> Result<(Vec<Song>, i64)> {
    let query = build_song_query(filter, page, limit);

    let mut count = sqlx::query_scalar::<_, i64>(&query.count_sql);
    for arg in &query.args {
        count = count.bind(arg);
    }
    let total = count.fetch_one(pool).await?;

    let mut select = sqlx::query(&query.select_sql);
    for arg in &query.args {
        select = select.bind(arg);
    }
    let rows = select
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(pool)
        .await?;

    Ok((rows.iter().map(song_from_row).collect(), total))
}

/// Update the present, non-empty fields of a song, one column at a time
///
/// The row's existence is confirmed first; NotFound propagates before
/// any mutation. Each per-field update runs sequentially. A field update
/// matching zero rows is logged and skipped; a failed statement is
/// logged, the remaining fields still run, and the first failure is
/// returned afterwards.
pub async fn update_song(pool: &SqlitePool, id: i64, input: &UpdateSong) -> Result<()> {
    get_song(pool, id).await?;

    debug!(id, "updating song");

    let fields: [(&'static str, &Option<String>); 5] = [
        ("group_name", &input.group),
        ("song_name", &input.song),
        ("release_date", &input.release_date),
        ("text", &input.text),
        ("link", &input.link),
    ];

    let mut first_err: Option<Error> = None;
    for (column, value) in fields {
        let Some(value) = value else { continue };
        if value.is_empty() {
            continue;
        }

        let sql =
            format!("UPDATE songs SET {column} = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?");
        match sqlx::query(&sql).bind(value).bind(id).execute(pool).await {
            Ok(result) if result.rows_affected() == 0 => {
                warn!(id, column, "field update matched no rows");
            }
            Ok(_) => {}
            Err(err) => {
                error!(id, column, error = %err, "field update failed");
                if first_err.is_none() {
                    first_err = Some(err.into());
                }
            }
        }
    }

    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Delete a song by id
///
/// Existence is confirmed first, and zero rows affected still reports
/// NotFound in case the row vanished between check and delete.
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<()> {
    get_song(pool, id).await?;

    debug!(id, "deleting song");

    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        warn!(id, "attempt to delete a song that no longer exists");
        return Err(not_found(id));
    }

    Ok(())
}
