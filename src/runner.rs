//! Message loop: read chat, dispatch, reply.

use crate::commands::CommandDispatcher;
use crate::livesplit::TimerClient;
use crate::transport::ChatTransport;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Counters for one transport session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub messages: usize,
    pub replies: usize,
}

/// Pump messages from `transport` through `dispatcher` until the transport
/// closes. Messages are handled strictly one after another; each one yields
/// zero or one reply.
pub async fn run<C, T>(transport: &mut C, dispatcher: &mut CommandDispatcher<T>) -> Result<RunStats>
where
    C: ChatTransport + ?Sized,
    T: TimerClient,
{
    let mut stats = RunStats::default();
    info!(prefix = %dispatcher.prefix(), "Listening for commands");

    while let Some(message) = transport
        .next_message()
        .await
        .context("Failed to read chat message")?
    {
        stats.messages += 1;
        debug!(sender = %message.sender, "Received: {}", message.text);

        if let Some(reply) = dispatcher.handle_line(&message.text).await {
            debug!("Sending: {}", reply);
            transport.send(&reply).await.context("Failed to send reply")?;
            stats.replies += 1;
        }
    }

    info!(
        messages = stats.messages,
        replies = stats.replies,
        "Chat session ended"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::mock_dispatcher;
    use crate::livesplit::mock::MockTimerClient;
    use crate::transport::ScriptedTransport;

    #[tokio::test]
    async fn test_one_reply_per_command() {
        let mut transport = ScriptedTransport::from_lines([
            "hello chat",
            "!splits none",
            "!bogus",
            "!thoughts",
            "!splits",
        ]);
        let mut dispatcher = mock_dispatcher(MockTimerClient::new());

        let stats = run(&mut transport, &mut dispatcher).await.unwrap();

        assert_eq!(stats, RunStats { messages: 5, replies: 3 });
        assert_eq!(
            transport.sent,
            vec!["why", "No thoughts.", "usage: !splits <comparison>"]
        );
    }

    #[tokio::test]
    async fn test_empty_session() {
        let mut transport = ScriptedTransport::default();
        let mut dispatcher = mock_dispatcher(MockTimerClient::new());
        let stats = run(&mut transport, &mut dispatcher).await.unwrap();
        assert_eq!(stats, RunStats::default());
        assert!(transport.sent.is_empty());
    }
}
