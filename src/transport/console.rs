//! Line-oriented transport over any async reader/writer pair.
//!
//! `absent-helper console` runs the bot against stdin/stdout, which is handy
//! for trying commands without a chat connection.

use super::traits::{ChatMessage, ChatTransport};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

pub const CONSOLE_SENDER: &str = "console";

pub struct ConsoleTransport<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleTransport<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W> ChatTransport for ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_message(&mut self) -> anyhow::Result<Option<ChatMessage>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let text = line.trim_end_matches(['\r', '\n']);
        Ok(Some(ChatMessage::new(CONSOLE_SENDER, text)))
    }

    async fn send(&mut self, text: &str) -> anyhow::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_lines_until_eof() {
        let input: &[u8] = b"!splits pb\r\nhello\n";
        let mut console = ConsoleTransport::new(input, Vec::new());

        let first = console.next_message().await.unwrap().unwrap();
        assert_eq!(first, ChatMessage::new("console", "!splits pb"));
        let second = console.next_message().await.unwrap().unwrap();
        assert_eq!(second.text, "hello");
        assert!(console.next_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_send_writes_line() {
        let input: &[u8] = b"";
        let mut console = ConsoleTransport::new(input, Vec::new());
        console.send("No thoughts.").await.unwrap();
        console.send("why").await.unwrap();
        assert_eq!(console.into_writer(), b"No thoughts.\nwhy\n");
    }
}
