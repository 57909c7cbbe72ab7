//! In-memory mock implementation of NotesService for tests.

use super::models::Paste;
use super::traits::NotesService;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Default)]
pub struct MockNotesService {
    pastes: Vec<Paste>,
    fail: bool,
}

impl MockNotesService {
    /// Notes are served in the given order, so pass them newest first.
    pub fn new(pastes: Vec<Paste>) -> Self {
        Self {
            pastes,
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            pastes: vec![],
            fail: true,
        }
    }
}

#[async_trait]
impl NotesService for MockNotesService {
    async fn latest_notes(&self, limit: usize) -> Result<Vec<Paste>> {
        if self.fail {
            anyhow::bail!("mock notes service unavailable");
        }
        Ok(self.pastes.iter().take(limit).cloned().collect())
    }
}
