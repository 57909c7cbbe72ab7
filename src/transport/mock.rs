//! Scripted in-memory ChatTransport for tests.

use super::traits::{ChatMessage, ChatTransport};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Hands out the scripted messages in order, then reports the connection as
/// closed. Everything sent is kept in `sent`.
#[derive(Default)]
pub struct ScriptedTransport {
    incoming: VecDeque<ChatMessage>,
    pub sent: Vec<String>,
}

impl ScriptedTransport {
    pub fn new(messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        Self {
            incoming: messages.into_iter().collect(),
            sent: Vec::new(),
        }
    }

    /// Script plain lines from a single viewer.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(lines.into_iter().map(|l| ChatMessage::new("viewer", l)))
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn next_message(&mut self) -> anyhow::Result<Option<ChatMessage>> {
        Ok(self.incoming.pop_front())
    }

    async fn send(&mut self, text: &str) -> anyhow::Result<()> {
        self.sent.push(text.to_string());
        Ok(())
    }
}
