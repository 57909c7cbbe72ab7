//! Trait abstraction for the LiveSplit Server connection

use super::TimerError;
use async_trait::async_trait;

/// A single-connection, single-request client for LiveSplit Server.
///
/// Methods take `&mut self`: the connection has exactly one owner and at most
/// one request in flight. Responses carry no request identifier, so sharing a
/// client across concurrent commands would require a `tokio::sync::Mutex`
/// around it.
#[async_trait]
pub trait TimerClient: Send {
    /// Open a connection if none is open. One attempt, no backoff.
    ///
    /// A refused or timed-out connect is a normal condition (the timer is not
    /// running) and surfaces as `false`.
    async fn ensure_connected(&mut self) -> bool;

    /// Ask for the final time of `comparison` over the live connection.
    ///
    /// On any error the connection is dropped.
    async fn query(&mut self, comparison: &str) -> Result<String, TimerError>;

    /// Drop the current connection, if any.
    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;
}
