//! Music playback lookups (`!spotify`)
//!
//! Architecture follows the project pattern (trait + impl + mock):
//! - `MusicService` trait
//! - `SpotifyClient`: Spotify Web API
//! - `MockMusicService`: fixed data for tests

pub mod client;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod models;
pub mod traits;

pub use client::SpotifyClient;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockMusicService;
pub use models::Track;
pub use traits::MusicService;
