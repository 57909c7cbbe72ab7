//! TCP client for LiveSplit Server's line protocol.
//!
//! Request: `getfinaltime <comparison>\r\n`. Response: whatever a single read
//! returns, capped at `max_recv` bytes, decoded and trimmed. There is no
//! length prefix or terminator to frame the response; a reply larger than the
//! cap, or split across segments, is silently truncated.

use super::traits::TimerClient;
use super::TimerError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

pub const DEFAULT_ADDR: &str = "localhost:16834";
pub const DEFAULT_MAX_RECV: usize = 4096;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns at most one connection to LiveSplit Server.
///
/// `stream` is `None` while disconnected; reconnecting replaces it by
/// assignment, so the old handle is dropped (and closed) in the same step.
pub struct LiveSplitClient {
    addr: String,
    max_recv: usize,
    timeout: Duration,
    stream: Option<TcpStream>,
}

impl LiveSplitClient {
    pub fn new(addr: impl Into<String>, max_recv: usize, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            max_recv: max_recv.max(1),
            timeout,
            stream: None,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Build the wire request for a comparison.
    pub fn request_line(comparison: &str) -> String {
        format!("getfinaltime {}\r\n", comparison)
    }
}

impl Default for LiveSplitClient {
    fn default() -> Self {
        Self::new(DEFAULT_ADDR, DEFAULT_MAX_RECV, DEFAULT_TIMEOUT)
    }
}

async fn exchange(
    stream: &mut TcpStream,
    request: &[u8],
    max_recv: usize,
    timeout: Duration,
) -> Result<String, TimerError> {
    stream.write_all(request).await?;

    let mut buf = vec![0u8; max_recv];
    let n = tokio::time::timeout(timeout, stream.read(&mut buf))
        .await
        .map_err(|_| TimerError::Timeout)??;
    if n == 0 {
        return Err(TimerError::Closed);
    }

    let response = String::from_utf8_lossy(&buf[..n]).trim().to_string();
    if response.is_empty() {
        return Err(TimerError::Closed);
    }
    Ok(response)
}

#[async_trait]
impl TimerClient for LiveSplitClient {
    async fn ensure_connected(&mut self) -> bool {
        if self.stream.is_some() {
            return true;
        }

        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
            Ok(Ok(stream)) => {
                info!(addr = %self.addr, "Connected to LiveSplit Server");
                self.stream = Some(stream);
                true
            }
            Ok(Err(e)) if e.kind() == ErrorKind::ConnectionRefused => {
                debug!(addr = %self.addr, "LiveSplit Server is not running");
                false
            }
            Ok(Err(e)) => {
                warn!(addr = %self.addr, "Failed to connect to LiveSplit Server: {}", e);
                false
            }
            Err(_) => {
                warn!(
                    addr = %self.addr,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Timed out connecting to LiveSplit Server"
                );
                false
            }
        }
    }

    async fn query(&mut self, comparison: &str) -> Result<String, TimerError> {
        let (max_recv, timeout) = (self.max_recv, self.timeout);
        let stream = self.stream.as_mut().ok_or(TimerError::NotConnected)?;

        let request = Self::request_line(comparison);
        debug!(request = %request.trim_end(), "Querying LiveSplit Server");

        let result = exchange(stream, request.as_bytes(), max_recv, timeout).await;
        if let Err(ref e) = result {
            debug!("Dropping LiveSplit connection: {}", e);
            self.stream = None;
        }
        result
    }

    fn disconnect(&mut self) {
        if self.stream.take().is_some() {
            debug!(addr = %self.addr, "Disconnected from LiveSplit Server");
        }
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncBufReadExt;
    use tokio::net::TcpListener;

    async fn listener() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        (listener, addr)
    }

    #[test]
    fn test_request_line() {
        assert_eq!(
            LiveSplitClient::request_line("Personal Best"),
            "getfinaltime Personal Best\r\n"
        );
    }

    #[tokio::test]
    async fn test_query_round_trip() {
        let (listener, addr) = listener().await;
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut reader = tokio::io::BufReader::new(socket);
            let mut line = String::new();
            reader.read_line(&mut line).await.unwrap();
            reader.get_mut().write_all(b"  1:23:45\r\n").await.unwrap();
            line
        });

        let mut client = LiveSplitClient::new(addr, DEFAULT_MAX_RECV, DEFAULT_TIMEOUT);
        assert!(client.ensure_connected().await);
        let time = client.query("Personal Best").await.unwrap();
        assert_eq!(time, "1:23:45");
        assert!(client.is_connected());

        let request = server.await.unwrap();
        assert_eq!(request, "getfinaltime Personal Best\r\n");
    }

    #[tokio::test]
    async fn test_response_capped_at_max_recv() {
        let (listener, addr) = listener().await;
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let _ = socket.read(&mut buf).await.unwrap();
            socket.write_all(b"1:23:45.678").await.unwrap();
        });

        let mut client = LiveSplitClient::new(addr, 4, DEFAULT_TIMEOUT);
        assert!(client.ensure_connected().await);
        assert_eq!(client.query("Personal Best").await.unwrap(), "1:23");
    }

    #[tokio::test]
    async fn test_connection_refused_is_false() {
        // Bind then drop to get a port nobody listens on
        let (listener, addr) = listener().await;
        drop(listener);

        let mut client = LiveSplitClient::new(addr, DEFAULT_MAX_RECV, DEFAULT_TIMEOUT);
        assert!(!client.ensure_connected().await);
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_query_without_connection() {
        let mut client = LiveSplitClient::default();
        let result = client.query("Personal Best").await;
        assert!(matches!(result, Err(TimerError::NotConnected)));
    }

    #[tokio::test]
    async fn test_closed_connection_drops_stream() {
        let (listener, addr) = listener().await;
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            drop(socket);
        });

        let mut client = LiveSplitClient::new(addr, DEFAULT_MAX_RECV, DEFAULT_TIMEOUT);
        assert!(client.ensure_connected().await);
        let result = client.query("Personal Best").await;
        assert!(result.is_err());
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_read_timeout() {
        let (listener, addr) = listener().await;
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            // Hold the socket open without answering
            tokio::time::sleep(Duration::from_millis(500)).await;
            drop(socket);
        });

        let mut client = LiveSplitClient::new(addr, DEFAULT_MAX_RECV, Duration::from_millis(50));
        assert!(client.ensure_connected().await);
        let result = client.query("Personal Best").await;
        assert!(matches!(result, Err(TimerError::Timeout)));
        assert!(!client.is_connected());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_disconnect() {
        let (listener, addr) = listener().await;
        tokio::spawn(async move {
            let _ = listener.accept().await;
        });

        let mut client = LiveSplitClient::new(addr, DEFAULT_MAX_RECV, DEFAULT_TIMEOUT);
        assert!(client.ensure_connected().await);
        client.disconnect();
        assert!(!client.is_connected());
    }
}
