//! `!splits <shorthand>`: final time for a LiveSplit comparison.
//!
//! Gates run in order and stop at the first failure. The first three never
//! touch the socket.

use crate::comparisons::{resolve_shorthand, ActivationTable, Shorthand};
use crate::livesplit::{query_with_retry, TimerClient, MAX_QUERY_ATTEMPTS};
use tracing::debug;

pub const SENTINEL_REPLY: &str = "why";
pub const TIMER_DOWN_REPLY: &str = "LiveSplit Server isn't running at the moment.";

pub async fn splits_reply<T>(shorthand: &str, activation: &ActivationTable, timer: &mut T) -> String
where
    T: TimerClient + ?Sized,
{
    let comparison = match resolve_shorthand(shorthand) {
        None => {
            return format!(
                "\"{}\" is not a shorthand for any known comparison.",
                shorthand
            )
        }
        Some(Shorthand::Sentinel) => return SENTINEL_REPLY.to_string(),
        Some(Shorthand::Comparison(name)) => name,
    };

    if !activation.is_active(comparison) {
        return format!(
            "The \"{}\" comparison is not currently active.",
            comparison
        );
    }

    if !timer.ensure_connected().await {
        return TIMER_DOWN_REPLY.to_string();
    }

    match query_with_retry(timer, comparison, MAX_QUERY_ATTEMPTS).await {
        Ok(time) => format!("Final time for comparison \"{}\" is {}.", comparison, time),
        Err(e) => {
            debug!(comparison, "Giving up on LiveSplit query: {}", e);
            TIMER_DOWN_REPLY.to_string()
        }
    }
}
