//! MusicService trait definition

use super::models::Track;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only view of the streamer's playback history.
///
/// # Implementations
///
/// - [`SpotifyClient`](super::SpotifyClient): Spotify Web API with a pre-issued token
/// - [`MockMusicService`](super::MockMusicService): fixed data for tests
#[async_trait]
pub trait MusicService: Send + Sync {
    /// The track playing right now, if any.
    async fn currently_playing(&self) -> Result<Option<Track>>;

    /// Up to `limit` most recently played tracks, newest first.
    async fn recently_played(&self, limit: usize) -> Result<Vec<Track>>;
}
