//! Minimal IRC client for Twitch chat.
//!
//! Only what a single-channel bot needs: PASS/NICK/USER registration, waiting
//! for the `001` welcome, JOIN, PING/PONG, and PRIVMSG in both directions.

use super::traits::{ChatMessage, ChatTransport};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

pub const DEFAULT_SERVER: &str = "irc.chat.twitch.tv:6667";
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum IrcError {
    #[error("IRC I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IRC server closed the connection")]
    Closed,

    #[error("IRC login rejected: {0}")]
    Rejected(String),

    #[error("timed out waiting for the IRC welcome")]
    Timeout,
}

/// A parsed IRC protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcMessage {
    pub prefix: Option<String>,
    pub command: String,
    pub params: Vec<String>,
}

impl IrcMessage {
    /// Parse `[@tags ][:prefix ]COMMAND [params...] [:trailing]`. Tags are dropped.
    pub fn parse(line: &str) -> Option<Self> {
        let mut rest = line.trim_end_matches(['\r', '\n']);

        if rest.starts_with('@') {
            rest = rest.split_once(' ')?.1;
        }

        let prefix = match rest.strip_prefix(':') {
            Some(stripped) => {
                let (prefix, tail) = stripped.split_once(' ')?;
                rest = tail;
                Some(prefix.to_string())
            }
            None => None,
        };

        let rest = rest.trim_start_matches(' ');
        let (command, mut rest) = match rest.split_once(' ') {
            Some((command, tail)) => (command, tail),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((param, tail)) => {
                    params.push(param.to_string());
                    rest = tail;
                }
                None => {
                    params.push(rest.to_string());
                    break;
                }
            }
        }

        Some(Self {
            prefix,
            command: command.to_ascii_uppercase(),
            params,
        })
    }

    /// Nickname part of the prefix (`nick!user@host`).
    pub fn nick(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .map(|p| p.split_once('!').map_or(p, |(nick, _)| nick))
    }
}

/// Connection settings for [`IrcTransport::connect`].
#[derive(Debug, Clone)]
pub struct IrcConfig {
    pub server: String,
    pub nick: String,
    pub oauth_token: String,
    /// Channel including the leading `#`
    pub channel: String,
}

/// A registered IRC connection joined to one channel.
pub struct IrcTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    channel: String,
    line: String,
}

impl IrcTransport {
    /// Connect, register, wait for the welcome and join the channel.
    pub async fn connect(config: &IrcConfig) -> Result<Self, IrcError> {
        info!(server = %config.server, "Connecting to chat server");
        let stream = tokio::time::timeout(HANDSHAKE_TIMEOUT, TcpStream::connect(&config.server))
            .await
            .map_err(|_| IrcError::Timeout)??;
        let (read_half, write_half) = stream.into_split();

        let mut transport = Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            channel: config.channel.clone(),
            line: String::new(),
        };

        let pass = if config.oauth_token.starts_with("oauth:") {
            config.oauth_token.clone()
        } else {
            format!("oauth:{}", config.oauth_token)
        };
        transport.write_raw(&format!("PASS {}", pass)).await?;
        transport.write_raw(&format!("NICK {}", config.nick)).await?;
        transport
            .write_raw(&format!("USER {0} 0 * :{0}", config.nick))
            .await?;

        tokio::time::timeout(HANDSHAKE_TIMEOUT, transport.await_welcome())
            .await
            .map_err(|_| IrcError::Timeout)??;

        info!(channel = %transport.channel, "Joining channel");
        let join = format!("JOIN {}", transport.channel);
        transport.write_raw(&join).await?;
        Ok(transport)
    }

    async fn await_welcome(&mut self) -> Result<(), IrcError> {
        loop {
            let msg = self.read_message().await?.ok_or(IrcError::Closed)?;
            match msg.command.as_str() {
                "001" => return Ok(()),
                "PING" => self.pong(&msg).await?,
                "NOTICE" => {
                    let text = msg.params.last().cloned().unwrap_or_default();
                    // Twitch reports bad credentials as a NOTICE, then disconnects
                    if text.contains("authentication failed")
                        || text.contains("Improperly formatted auth")
                    {
                        return Err(IrcError::Rejected(text));
                    }
                    debug!(notice = %text, "Server notice");
                }
                _ => {}
            }
        }
    }

    /// Read and parse the next line. `Ok(None)` on EOF; unparsable lines are skipped.
    async fn read_message(&mut self) -> Result<Option<IrcMessage>, IrcError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line).await? == 0 {
                return Ok(None);
            }
            match IrcMessage::parse(&self.line) {
                Some(msg) => return Ok(Some(msg)),
                None => debug!(line = %self.line.trim_end(), "Ignoring unparsable IRC line"),
            }
        }
    }

    async fn pong(&mut self, ping: &IrcMessage) -> Result<(), IrcError> {
        let token = ping.params.first().map(String::as_str).unwrap_or("");
        self.write_raw(&format!("PONG :{}", token)).await
    }

    async fn write_raw(&mut self, line: &str) -> Result<(), IrcError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Outgoing text must stay on one protocol line.
fn sanitize(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

#[async_trait]
impl ChatTransport for IrcTransport {
    async fn next_message(&mut self) -> anyhow::Result<Option<ChatMessage>> {
        loop {
            let Some(msg) = self.read_message().await? else {
                return Ok(None);
            };

            match msg.command.as_str() {
                "PING" => self.pong(&msg).await?,
                "PRIVMSG" => {
                    let [target, text] = msg.params.as_slice() else {
                        continue;
                    };
                    if !target.eq_ignore_ascii_case(&self.channel) {
                        continue;
                    }
                    let sender = msg.nick().unwrap_or_default().to_string();
                    return Ok(Some(ChatMessage::new(sender, text.clone())));
                }
                "RECONNECT" => {
                    warn!("Chat server asked us to reconnect");
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    async fn send(&mut self, text: &str) -> anyhow::Result<()> {
        let line = format!("PRIVMSG {} :{}", self.channel, sanitize(text));
        self.write_raw(&line).await?;
        Ok(())
    }
}
