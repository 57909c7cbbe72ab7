//! Published notes lookups (`!thoughts`)
//!
//! - `NotesService` trait
//! - `PastebinClient`: Pastebin's `api_post.php` list endpoint
//! - `MockNotesService`: fixed data for tests

pub mod client;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod models;
pub mod traits;

pub use client::PastebinClient;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockNotesService;
pub use models::Paste;
pub use traits::NotesService;
