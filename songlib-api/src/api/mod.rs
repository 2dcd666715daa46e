//! HTTP API handlers for songlib-api

pub mod health;
pub mod songs;

pub use health::health_routes;
pub use songs::{
    create_song, delete_song, generate_songs, get_song, list_songs, song_lyrics, update_song,
};
