//! `!thoughts`: link to the latest published note.

use crate::notes::NotesService;
use tracing::warn;

pub const NO_THOUGHTS_REPLY: &str = "No thoughts.";
pub const UNREACHABLE_REPLY: &str = "Couldn't reach Pastebin right now.";

pub async fn thoughts_reply(notes: &dyn NotesService) -> String {
    match notes.latest_notes(1).await {
        Ok(pastes) => match pastes.first() {
            Some(paste) => paste.summary(),
            None => NO_THOUGHTS_REPLY.to_string(),
        },
        Err(e) => {
            warn!("Pastebin lookup failed: {:#}", e);
            UNREACHABLE_REPLY.to_string()
        }
    }
}
