//! LiveSplit Server client
//!
//! Architecture follows the project pattern (trait + impl + mock):
//! - `TimerClient` trait: connect / query / disconnect over one owned connection
//! - `LiveSplitClient`: TCP implementation of the `getfinaltime` line protocol
//! - `MockTimerClient`: scripted mock for tests
//!
//! The reconnect-and-retry policy lives in [`retry::query_with_retry`], outside
//! the client, so every caller gets the same bounded two-attempt behaviour.

pub mod client;
pub mod retry;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use client::LiveSplitClient;
pub use retry::{query_with_retry, MAX_QUERY_ATTEMPTS};
pub use traits::TimerClient;

use thiserror::Error;

/// Failures talking to LiveSplit Server. All of them mean "service unavailable"
/// to the chat user.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("not connected to LiveSplit Server")]
    NotConnected,

    #[error("LiveSplit Server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LiveSplit Server closed the connection")]
    Closed,

    #[error("timed out waiting for LiveSplit Server")]
    Timeout,
}
