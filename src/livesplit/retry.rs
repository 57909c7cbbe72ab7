//! Reconnect-and-retry policy for LiveSplit queries.

use super::traits::TimerClient;
use super::TimerError;
use tracing::{debug, warn};

/// Attempts per command: the first query plus one retry on a fresh connection.
pub const MAX_QUERY_ATTEMPTS: usize = 2;

/// Query `comparison`, replacing the connection between attempts.
///
/// Each attempt makes sure a connection exists, then issues one query. A
/// failed attempt discards the connection before the next one. With
/// `attempts = n` there are at most `n` queries and at most `n` connect
/// attempts (fewer when a live connection is reused). No backoff.
pub async fn query_with_retry<C>(
    client: &mut C,
    comparison: &str,
    attempts: usize,
) -> Result<String, TimerError>
where
    C: TimerClient + ?Sized,
{
    let attempts = attempts.max(1);
    let mut last_error = TimerError::NotConnected;

    for attempt in 1..=attempts {
        if attempt > 1 {
            client.disconnect();
        }

        if !client.ensure_connected().await {
            debug!(attempt, "LiveSplit Server unavailable, giving up");
            return Err(TimerError::NotConnected);
        }

        match client.query(comparison).await {
            Ok(time) => return Ok(time),
            Err(e) => {
                warn!(attempt, comparison, "LiveSplit query failed: {}", e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}
