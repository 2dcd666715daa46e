//! Configuration loading for songlib services
//!
//! Each value resolves with the following priority order:
//! 1. Environment variable (`SONGLIB_*`)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! The config file location itself resolves CLI argument → `SONGLIB_CONFIG`
//! → OS-dependent default (`<config dir>/songlib/config.toml`).

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MUSIC_INFO_URL: &str = "http://127.0.0.1:8081";

/// Raw config file contents; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub music_info_url: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub host: String,
    pub port: u16,
    /// SQLite database file location
    pub database_path: PathBuf,
    /// Base URL of the external music info service
    pub music_info_url: String,
}

impl AppConfig {
    /// Resolve configuration from environment, config file, and defaults
    pub fn load(cli_config: Option<&Path>) -> Result<Self> {
        let file_config = match resolve_config_path(cli_config) {
            Some(path) if path.exists() => read_toml_config(&path)?,
            _ => TomlConfig::default(),
        };

        let host = std::env::var("SONGLIB_HOST")
            .ok()
            .or(file_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match std::env::var("SONGLIB_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("invalid SONGLIB_PORT value: {raw}")))?,
            Err(_) => file_config.port.unwrap_or(DEFAULT_PORT),
        };

        let database_path = std::env::var("SONGLIB_DB_PATH")
            .ok()
            .map(PathBuf::from)
            .or(file_config.database_path)
            .unwrap_or_else(default_database_path);

        let music_info_url = std::env::var("SONGLIB_MUSIC_INFO_URL")
            .ok()
            .or(file_config.music_info_url)
            .unwrap_or_else(|| DEFAULT_MUSIC_INFO_URL.to_string());

        Ok(Self {
            host,
            port,
            database_path,
            music_info_url,
        })
    }
}

/// Locate the config file: CLI argument → env var → platform default
fn resolve_config_path(cli_config: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_config {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var("SONGLIB_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("songlib").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("songlib").join("songlib.db"))
        .unwrap_or_else(|| PathBuf::from("songlib.db"))
}
