//! In-memory mock implementation of MusicService for tests.

use super::models::Track;
use super::traits::MusicService;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Serves a fixed "now playing" track and play history, and records which
/// methods were called.
#[derive(Default)]
pub struct MockMusicService {
    current: Option<Track>,
    history: Vec<Track>,
    fail: bool,
    calls: RwLock<Vec<&'static str>>,
}

impl MockMusicService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playing(mut self, track: Track) -> Self {
        self.current = Some(track);
        self
    }

    pub fn with_history(mut self, tracks: Vec<Track>) -> Self {
        self.history = tracks;
        self
    }

    /// Make every call fail, as if Spotify were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<&'static str> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl MusicService for MockMusicService {
    async fn currently_playing(&self) -> Result<Option<Track>> {
        self.calls.write().await.push("currently_playing");
        if self.fail {
            anyhow::bail!("mock music service unavailable");
        }
        Ok(self.current.clone())
    }

    async fn recently_played(&self, limit: usize) -> Result<Vec<Track>> {
        self.calls.write().await.push("recently_played");
        if self.fail {
            anyhow::bail!("mock music service unavailable");
        }
        Ok(self.history.iter().take(limit).cloned().collect())
    }
}
