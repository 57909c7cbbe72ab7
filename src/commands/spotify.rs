//! `!spotify current|previous`

use super::parser::SpotifyAction;
use crate::music::MusicService;
use tracing::warn;

pub const NOTHING_PLAYING_REPLY: &str = "No currently playing track.";
pub const NO_HISTORY_REPLY: &str = "No recently played tracks.";
pub const UNREACHABLE_REPLY: &str = "Couldn't reach Spotify right now.";

/// Reply for a spotify action. `Other` actions are handled by the dispatcher.
pub async fn spotify_reply(action: &SpotifyAction, music: &dyn MusicService) -> Option<String> {
    let reply = match action {
        SpotifyAction::Current => match music.currently_playing().await {
            Ok(Some(track)) => track.to_string(),
            Ok(None) => NOTHING_PLAYING_REPLY.to_string(),
            Err(e) => {
                warn!("Spotify currently-playing lookup failed: {:#}", e);
                UNREACHABLE_REPLY.to_string()
            }
        },
        SpotifyAction::Previous => match music.recently_played(1).await {
            Ok(tracks) => match tracks.into_iter().next() {
                Some(track) => track.to_string(),
                None => NO_HISTORY_REPLY.to_string(),
            },
            Err(e) => {
                warn!("Spotify recently-played lookup failed: {:#}", e);
                UNREACHABLE_REPLY.to_string()
            }
        },
        SpotifyAction::Other(_) => return None,
    };
    Some(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{MockMusicService, Track};

    #[tokio::test]
    async fn test_current_track() {
        let music = MockMusicService::new().playing(Track::new("Roygbiv", ["Boards of Canada"]));
        let reply = spotify_reply(&SpotifyAction::Current, &music).await;
        assert_eq!(reply.as_deref(), Some("Boards of Canada - Roygbiv"));
    }

    #[tokio::test]
    async fn test_nothing_playing_makes_one_call() {
        let music = MockMusicService::new()
            .with_history(vec![Track::new("Roygbiv", ["Boards of Canada"])]);
        let reply = spotify_reply(&SpotifyAction::Current, &music).await;
        assert_eq!(reply.as_deref(), Some("No currently playing track."));
        assert_eq!(music.calls().await, vec!["currently_playing"]);
    }

    #[tokio::test]
    async fn test_previous_track() {
        let music = MockMusicService::new().with_history(vec![
            Track::new("Avril 14th", ["Aphex Twin"]),
            Track::new("Roygbiv", ["Boards of Canada"]),
        ]);
        let reply = spotify_reply(&SpotifyAction::Previous, &music).await;
        assert_eq!(reply.as_deref(), Some("Aphex Twin - Avril 14th"));
    }

    #[tokio::test]
    async fn test_no_history() {
        let music = MockMusicService::new();
        let reply = spotify_reply(&SpotifyAction::Previous, &music).await;
        assert_eq!(reply.as_deref(), Some("No recently played tracks."));
    }

    #[tokio::test]
    async fn test_service_failure() {
        let music = MockMusicService::failing();
        let reply = spotify_reply(&SpotifyAction::Current, &music).await;
        assert_eq!(reply.as_deref(), Some(UNREACHABLE_REPLY));
    }

    #[tokio::test]
    async fn test_other_action_not_handled() {
        let music = MockMusicService::new();
        let reply = spotify_reply(&SpotifyAction::Other("skip".into()), &music).await;
        assert!(reply.is_none());
        assert!(music.calls().await.is_empty());
    }
}
