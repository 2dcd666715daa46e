//! songlib-api - Song Catalog service
//!
//! HTTP service exposing the song catalog: list/filter/paginate,
//! create with external enrichment, update, delete, and lyric pages.

use anyhow::Result;
use clap::Parser;
use songlib_api::services::music_info::MusicInfoClient;
use songlib_api::{build_router, AppState};
use songlib_common::config::AppConfig;
use songlib_common::db::init_database;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "songlib-api", version, about = "Song catalog service")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting songlib-api v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Database: {}", config.database_path.display());
    let pool = init_database(&config.database_path).await?;
    info!("Database connection established");

    let music_info = MusicInfoClient::new(&config.music_info_url)
        .map_err(|e| anyhow::anyhow!("failed to build music info client: {e}"))?;
    info!("Music info service: {}", config.music_info_url);

    let state = AppState::new(pool, music_info);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("songlib-api listening on http://{}", listener.local_addr()?);
    info!("Health check: http://{}/health", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
