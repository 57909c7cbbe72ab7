//! Notes data models

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

/// A published note (a Pastebin paste).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub title: String,
    /// Publication time, seconds since the Unix epoch
    pub timestamp_seconds: i64,
    pub url: String,
}

impl Paste {
    pub fn new(title: impl Into<String>, timestamp_seconds: i64, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            timestamp_seconds,
            url: url.into(),
        }
    }

    /// Publication date in the bot's local timezone, `YYYY-MM-DD`.
    pub fn date(&self) -> Option<String> {
        Local
            .timestamp_opt(self.timestamp_seconds, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    }

    /// Chat line: `"{title} ({date}) --- {url}"`.
    pub fn summary(&self) -> String {
        let date = self.date().unwrap_or_else(|| "unknown date".to_string());
        format!("{} ({}) --- {}", self.title, date, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-11-15 12:00:00 UTC: the same calendar day in every UTC-11..UTC+11 zone
    const MIDDAY: i64 = 1_700_049_600;

    #[test]
    fn test_summary() {
        let paste = Paste::new("on routing", MIDDAY, "https://pastebin.com/abc123");
        assert_eq!(
            paste.summary(),
            "on routing (2023-11-15) --- https://pastebin.com/abc123"
        );
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let paste = Paste::new("t", i64::MAX, "u");
        assert!(paste.date().is_none());
        assert_eq!(paste.summary(), "t (unknown date) --- u");
    }
}
