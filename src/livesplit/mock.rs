//! Scripted in-memory TimerClient for testing without LiveSplit Server.

use super::traits::TimerClient;
use super::TimerError;
use async_trait::async_trait;
use std::collections::VecDeque;

/// Plays back scripted connect outcomes and query responses, and records
/// every connect attempt and query it sees.
///
/// Once a script runs out, connects succeed and queries fail with `Closed`.
#[derive(Default)]
pub struct MockTimerClient {
    connects: VecDeque<bool>,
    responses: VecDeque<Result<String, TimerError>>,
    connected: bool,
    pub connect_attempts: usize,
    pub queries: Vec<String>,
}

impl MockTimerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connects(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.connects.extend(outcomes);
        self
    }

    pub fn with_responses(
        mut self,
        responses: impl IntoIterator<Item = Result<String, TimerError>>,
    ) -> Self {
        self.responses.extend(responses);
        self
    }

    /// Total socket interactions observed.
    pub fn io_count(&self) -> usize {
        self.connect_attempts + self.queries.len()
    }
}

#[async_trait]
impl TimerClient for MockTimerClient {
    async fn ensure_connected(&mut self) -> bool {
        if self.connected {
            return true;
        }
        self.connect_attempts += 1;
        self.connected = self.connects.pop_front().unwrap_or(true);
        self.connected
    }

    async fn query(&mut self, comparison: &str) -> Result<String, TimerError> {
        if !self.connected {
            return Err(TimerError::NotConnected);
        }
        self.queries.push(comparison.to_string());
        let response = self
            .responses
            .pop_front()
            .unwrap_or(Err(TimerError::Closed));
        if response.is_err() {
            self.connected = false;
        }
        response
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
