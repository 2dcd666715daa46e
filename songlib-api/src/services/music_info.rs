//! Music info service client
//!
//! Fetches song details (release date, lyrics, link) from the external
//! enrichment endpoint. A single GET per lookup, no retry: a transport
//! failure is terminal for the call, and the request is bounded by a
//! fixed client-side timeout.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Music info client errors
#[derive(Debug, Error)]
pub enum MusicInfoError {
    /// Connectivity or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; body kept as opaque diagnostic text
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// 2xx response whose body did not decode as a song detail
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Song detail returned by the info endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetail {
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Music info API client
#[derive(Debug, Clone)]
pub struct MusicInfoClient {
    base_url: String,
    http: reqwest::Client,
}

impl MusicInfoClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MusicInfoError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MusicInfoError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Look up the detail for a group/song pair
    pub async fn song_detail(&self, group: &str, song: &str) -> Result<SongDetail, MusicInfoError> {
        let url = format!("{}/info", self.base_url);

        tracing::debug!(group, song, url = %url, "querying music info service");

        let response = self
            .http
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| MusicInfoError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MusicInfoError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let detail: SongDetail = response
            .json()
            .await
            .map_err(|e| MusicInfoError::Parse(e.to_string()))?;

        tracing::debug!(group, song, "retrieved song detail");

        Ok(detail)
    }
}
