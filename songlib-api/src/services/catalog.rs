//! Catalog operations composing enrichment, storage, and lyric paging
//!
//! This is the only place the music info client and the song store are
//! composed; it owns the translation from transport-level enrichment
//! failures to domain errors, so HTTP status detail never leaks past
//! the service boundary.

use crate::db::songs::{self, NewSong};
use crate::services::music_info::{MusicInfoClient, MusicInfoError};
use rand::Rng;
use serde::Serialize;
use songlib_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

/// Create a song: fetch enrichment detail, then persist the merged song
///
/// Enrichment outcomes are classified here: a bad-request rejection
/// becomes InvalidInput, any other failure (transport, decode, other
/// statuses) becomes ExternalService. The store is never touched when
/// enrichment fails. Store failures pass through unclassified.
pub async fn create_song(
    pool: &SqlitePool,
    client: &MusicInfoClient,
    group: &str,
    song: &str,
) -> Result<i64> {
    let detail = match client.song_detail(group, song).await {
        Ok(detail) => detail,
        Err(MusicInfoError::Api { status: 400, body }) => {
            warn!(group, song, "music info service rejected the request");
            return Err(Error::InvalidInput(format!(
                "music info service rejected group \"{group}\", song \"{song}\": {body}"
            )));
        }
        Err(err) => {
            error!(group, song, error = %err, "music info lookup failed");
            return Err(Error::ExternalService(err.to_string()));
        }
    };

    let new_song = NewSong {
        group: group.to_string(),
        song: song.to_string(),
        release_date: detail.release_date,
        text: detail.text,
        link: detail.link,
    };

    let id = songs::insert_song(pool, &new_song).await?;
    info!(id, group, song, "song created");

    Ok(id)
}

/// One page of a song's lyrics
#[derive(Debug, Clone, Serialize)]
pub struct LyricsPage {
    pub verses: Vec<String>,
    pub total: i64,
}

/// Split lyric text into verses on blank lines
///
/// Every segment counts, including empty ones: no filtering is applied,
/// so empty text still yields one (empty) verse.
pub fn split_verses(text: &str) -> Vec<String> {
    text.split("\n\n").map(str::to_string).collect()
}

/// Fetch one page of a song's verses plus the total verse count
///
/// A page past the end of the lyric is not an error: it yields an empty
/// verse slice alongside the true total.
pub async fn song_lyrics(pool: &SqlitePool, id: i64, page: i64, limit: i64) -> Result<LyricsPage> {
    let song = songs::get_song(pool, id).await?;

    let verses = split_verses(song.text.as_deref().unwrap_or_default());
    let total = verses.len() as i64;

    let start = (page - 1) * limit;
    let selected = if start >= total {
        Vec::new()
    } else {
        let end = (start + limit).min(total);
        verses[start as usize..end as usize].to_vec()
    };

    Ok(LyricsPage {
        verses: selected,
        total,
    })
}

const FAKE_GROUPS: &[&str] = &["Muse", "Nightwish", "Daft Punk", "Radiohead", "Queen", "Gorillaz"];
const FAKE_TITLES: &[&str] = &[
    "Madness",
    "Storytime",
    "One More Time",
    "Creep",
    "Innuendo",
    "Feel Good Inc",
];

/// Insert `count` randomly assembled songs for manual testing
pub async fn generate_songs(pool: &SqlitePool, count: i64) -> Result<i64> {
    let songs_to_insert: Vec<NewSong> = {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| random_song(&mut rng)).collect()
    };

    for song in &songs_to_insert {
        songs::insert_song(pool, song).await?;
    }

    info!(count, "generated fake songs");
    Ok(count)
}

fn random_song(rng: &mut impl Rng) -> NewSong {
    let group = FAKE_GROUPS[rng.gen_range(0..FAKE_GROUPS.len())];
    let title = FAKE_TITLES[rng.gen_range(0..FAKE_TITLES.len())];

    let year: i32 = rng.gen_range(1970..=2024);
    let month: u32 = rng.gen_range(1..=12);
    let day: u32 = rng.gen_range(1..=28);

    let verse_count = rng.gen_range(2..=5);
    let text = (0..verse_count)
        .map(|i| format!("Placeholder verse {} of {title}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");

    NewSong {
        group: group.to_string(),
        song: title.to_string(),
        release_date: Some(format!("{year:04}-{month:02}-{day:02}")),
        text: Some(text),
        link: Some(format!("https://music.example/{}/{}", slug(group), slug(title))),
    }
}

fn slug(value: &str) -> String {
    value.to_lowercase().replace(' ', "-")
}
