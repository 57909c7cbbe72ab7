//! ChatTransport trait definition

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One public message said in the joined channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// A single joined chat channel.
#[async_trait]
pub trait ChatTransport: Send {
    /// Wait for the next channel message. `Ok(None)` means the connection closed.
    async fn next_message(&mut self) -> Result<Option<ChatMessage>>;

    /// Say one line in the channel.
    async fn send(&mut self, text: &str) -> Result<()>;
}
