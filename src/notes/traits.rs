//! NotesService trait definition

use super::models::Paste;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only access to the streamer's published notes.
#[async_trait]
pub trait NotesService: Send + Sync {
    /// Up to `limit` notes, newest first.
    async fn latest_notes(&self, limit: usize) -> Result<Vec<Paste>>;
}
