//! Spotify Web API client
//!
//! Uses a bearer token issued out of band (the OAuth flow is not handled here).
//! Requires the `user-read-currently-playing` and `user-read-recently-played`
//! scopes.

use super::models::Track;
use super::traits::MusicService;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com";

#[derive(Clone)]
pub struct SpotifyClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

/// `GET /v1/me/player/currently-playing`
#[derive(Debug, Deserialize)]
struct CurrentlyPlaying {
    /// Null while an ad or a podcast episode without track data plays
    item: Option<SpotifyTrack>,
}

/// `GET /v1/me/player/recently-played`
#[derive(Debug, Deserialize)]
struct RecentlyPlayed {
    #[serde(default)]
    items: Vec<PlayHistory>,
}

#[derive(Debug, Deserialize)]
struct PlayHistory {
    track: SpotifyTrack,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

impl From<SpotifyTrack> for Track {
    fn from(track: SpotifyTrack) -> Self {
        Track {
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// GET an endpoint; `None` when Spotify answers 204 or an empty body.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Option<String>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .with_context(|| format!("Failed to connect to Spotify at {}", url))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Spotify API returned {}: {}", status.as_u16(), body);
        }

        let body = response
            .text()
            .await
            .context("Failed to read Spotify response")?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }
}

#[async_trait]
impl MusicService for SpotifyClient {
    async fn currently_playing(&self) -> Result<Option<Track>> {
        let Some(body) = self.get("/v1/me/player/currently-playing", &[]).await? else {
            debug!("Spotify reports nothing playing");
            return Ok(None);
        };

        let playing: CurrentlyPlaying =
            serde_json::from_str(&body).context("Failed to parse currently-playing response")?;
        Ok(playing.item.map(Track::from))
    }

    async fn recently_played(&self, limit: usize) -> Result<Vec<Track>> {
        let query = [("limit", limit.clamp(1, 50).to_string())];
        let Some(body) = self.get("/v1/me/player/recently-played", &query).await? else {
            return Ok(vec![]);
        };

        let recent: RecentlyPlayed =
            serde_json::from_str(&body).context("Failed to parse recently-played response")?;
        Ok(recent
            .items
            .into_iter()
            .take(limit)
            .map(|h| Track::from(h.track))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_currently_playing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me/player/currently-playing"))
            .and(header("authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "is_playing": true,
                "item": {
                    "name": "Xtal",
                    "artists": [{"name": "Aphex Twin"}]
                }
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::new(server.uri(), "token-123").unwrap();
        let track = client.currently_playing().await.unwrap().unwrap();
        assert_eq!(track, Track::new("Xtal", ["Aphex Twin"]));
    }

    #[tokio::test]
    async fn test_currently_playing_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me/player/currently-playing"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = SpotifyClient::new(server.uri(), "t").unwrap();
        assert!(client.currently_playing().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_currently_playing_null_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me/player/currently-playing"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"is_playing": true, "item": null})),
            )
            .mount(&server)
            .await;

        let client = SpotifyClient::new(server.uri(), "t").unwrap();
        assert!(client.currently_playing().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recently_played() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me/player/recently-played"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "played_at": "2024-05-01T12:00:00Z",
                    "track": {
                        "name": "Teardrop",
                        "artists": [{"name": "Massive Attack"}, {"name": "Elizabeth Fraser"}]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::new(format!("{}/", server.uri()), "t").unwrap();
        let tracks = client.recently_played(1).await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(
            tracks[0].to_string(),
            "Massive Attack, Elizabeth Fraser - Teardrop"
        );
    }

    #[tokio::test]
    async fn test_recently_played_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/me/player/recently-played"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let client = SpotifyClient::new(server.uri(), "t").unwrap();
        assert!(client.recently_played(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&server)
            .await;

        let client = SpotifyClient::new(server.uri(), "t").unwrap();
        let err = client.currently_playing().await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
